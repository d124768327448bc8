use serde::{Deserialize, Serialize};

/// How the integer part of an amount is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 12,34,567: last three digits, then pairs.
    #[default]
    Indian,
    /// 1,234,567
    Thousands,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

impl CurrencyFormat {
    /// Formats with two decimals, rounding halves away from zero.
    ///
    /// Rounding works on the shortest decimal form of the value, so `40.425`
    /// becomes `40.43` even though its binary value sits just below the tie.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}", self.symbol, amount);
        }

        let (whole, fraction) = round_to_cents(&amount.abs().to_string());
        let is_zero = whole.bytes().chain(fraction.bytes()).all(|d| d == b'0');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

        format!(
            "{}{}{}.{}",
            sign,
            self.symbol,
            self.group_digits(&whole),
            fraction
        )
    }

    fn group_digits(&self, digits: &str) -> String {
        if digits.len() <= 3 {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let group_size = match self.grouping {
            Grouping::Indian => 2,
            Grouping::Thousands => 3,
        };

        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(group_size);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        groups.push(tail);
        groups.join(",")
    }
}

/// Splits a plain decimal string into whole digits and two rounded fraction digits.
fn round_to_cents(decimal: &str) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let frac = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.extend((0..2).map(|i| frac.get(i).map_or(0, |b| b - b'0')));

    if frac.get(2).is_some_and(|b| *b >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (whole, fraction) = text.split_at(text.len() - 2);
    (whole.to_string(), fraction.to_string())
}
