/// Subtractive left-to-right decode. Malformed numerals decode best effort;
/// the inputs come from a fixed, known document.
pub fn roman_to_int(roman: &str) -> Option<u32> {
    let values = roman
        .chars()
        .map(symbol_value)
        .collect::<Option<Vec<u32>>>()?;

    if values.is_empty() {
        return None;
    }

    let mut total = 0_i64;
    for (index, value) in values.iter().enumerate() {
        let next_is_larger = values
            .get(index + 1)
            .map(|next| next > value)
            .unwrap_or(false);
        if next_is_larger {
            total -= i64::from(*value);
        } else {
            total += i64::from(*value);
        }
    }

    u32::try_from(total).ok()
}

pub fn int_to_roman(mut value: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (weight, symbol) in TABLE {
        while value >= *weight {
            out.push_str(symbol);
            value -= weight;
        }
    }

    out
}

fn symbol_value(symbol: char) -> Option<u32> {
    match symbol.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}
