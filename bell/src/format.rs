//! 巨大な整数を人間が読める形に整形する。
use num::{pow, BigUint};
use std::{
    error::Error,
    fmt::{self, Display},
    time::Duration,
};

/// 仮数部の小数点以下の桁数
pub const MANTISSA_PRECISION: usize = 5;

/// 10^SCIENTIFIC_THRESHOLD_EXP を超えた値のみ指数表記も表示する
pub const SCIENTIFIC_THRESHOLD_EXP: u32 = 9;

/// 仮数部の桁数の上限
pub const MAX_PRECISION: usize = 100;

/// しきい値の指数の上限
pub const MAX_THRESHOLD_EXP: u32 = 1000;

/// 経過時間の仮数部の小数点以下の桁数
pub const SECONDS_PRECISION: usize = 6;

/// 3 桁ごとの区切り文字
pub const GROUP_SEPARATOR: char = ',';

/// 整形エラーを表す型
#[derive(Debug, PartialEq, Eq)]
pub enum FormatError {
    /// 0 は指数表記にできない
    Unsupported,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatError: {self:?}")
    }
}

impl Error for FormatError {}

/// 表示方針の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    threshold: BigUint,
    precision: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(SCIENTIFIC_THRESHOLD_EXP, MANTISSA_PRECISION)
    }
}

impl FormatConfig {
    /// しきい値を 10^threshold_exp とした設定を作る。
    ///
    /// 上限を超える値は MAX_THRESHOLD_EXP, MAX_PRECISION に丸める。
    pub fn new(threshold_exp: u32, precision: usize) -> Self {
        let threshold_exp = threshold_exp.min(MAX_THRESHOLD_EXP);
        Self {
            threshold: pow(BigUint::from(10u32), threshold_exp as usize),
            precision: precision.min(MAX_PRECISION),
        }
    }

    pub fn threshold(&self) -> &BigUint {
        &self.threshold
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn should_show_scientific(&self, value: &BigUint) -> bool {
        should_show_scientific(value, &self.threshold)
    }

    pub fn scientific(&self, value: &BigUint) -> Result<String, FormatError> {
        format_scientific(value, self.precision)
    }
}

/// 10 進数の数字列を 3 桁ごとに区切る。
///
/// ```
/// assert_eq!("1,234,567", bell::format::group_digits("1234567"));
/// ```
pub fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

/// 10 進表記の数字列。
///
/// 巨大な値の 10 進変換は重いので一度だけ行い、
/// 区切り表記、桁数、指数表記はこの数字列から作る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal(String);

impl Decimal {
    pub fn new(value: &BigUint) -> Self {
        Decimal(value.to_str_radix(10))
    }

    /// 区切り付きの正確な表記
    pub fn grouped(&self) -> String {
        group_digits(&self.0)
    }

    /// 桁数。 0 は 1 桁とする。
    pub fn digit_count(&self) -> usize {
        self.0.len()
    }

    /// `d.ddddde+XX` 形式の指数表記。
    ///
    /// 丸めは切り捨てる最初の桁による四捨五入。
    /// precision は MAX_PRECISION で頭打ちにする。
    ///
    /// # 返り値
    ///
    /// 0 の場合は Err を返す。
    pub fn scientific(&self, precision: usize) -> Result<String, FormatError> {
        if self.0 == "0" {
            return Err(FormatError::Unsupported);
        }

        let precision = precision.min(MAX_PRECISION);
        let digits = self.0.as_bytes();
        let mut exp = digits.len() - 1;

        // 有効桁 precision + 1 桁を取り出し、足りなければ 0 で埋める
        let keep = precision + 1;
        let mut mantissa: Vec<u8> = digits.iter().take(keep).map(|b| b - b'0').collect();
        mantissa.resize(keep, 0);

        if digits.get(keep).is_some_and(|&b| b >= b'5') {
            // 繰り上げ
            let mut i = keep;
            loop {
                if i == 0 {
                    // 9.99999... が 10.0000... になった
                    mantissa.insert(0, 1);
                    mantissa.truncate(keep);
                    exp += 1;
                    break;
                }
                i -= 1;
                if mantissa[i] == 9 {
                    mantissa[i] = 0;
                } else {
                    mantissa[i] += 1;
                    break;
                }
            }
        }

        let mut s = String::with_capacity(keep + 6);
        s.push(char::from(b'0' + mantissa[0]));
        if precision > 0 {
            s.push('.');
            s.extend(mantissa[1..].iter().map(|d| char::from(b'0' + d)));
        }
        s.push_str(&format!("e+{exp:02}"));
        Ok(s)
    }
}

/// 区切り付きの正確な 10 進表記。
pub fn format_exact(value: &BigUint) -> String {
    Decimal::new(value).grouped()
}

/// 10 進表記の桁数。0 は 1 桁とする。
pub fn digit_count(value: &BigUint) -> usize {
    Decimal::new(value).digit_count()
}

/// value > threshold のとき true
pub fn should_show_scientific(value: &BigUint, threshold: &BigUint) -> bool {
    value > threshold
}

/// `d.ddddde+XX` 形式の指数表記。
///
/// f64 を経由せず 10 進の数字列から作るので、 f64 の範囲を超える値も扱える。
///
/// # 返り値
///
/// value が 0 の場合は Err を返す。
pub fn format_scientific(value: &BigUint, precision: usize) -> Result<String, FormatError> {
    Decimal::new(value).scientific(precision)
}

/// 経過時間 (秒) を `d.dddddde±XX` 形式で表す。
pub fn format_seconds(elapsed: Duration) -> String {
    format_float_exp(elapsed.as_secs_f64(), SECONDS_PRECISION)
}

/// Rust の `{:e}` は `1.5e-3` のように指数部の符号と桁数が揃わないので整える。
fn format_float_exp(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => s,
        },
        None => s, // NaN, inf
    }
}




#[cfg(test)]
mod decimal {
    use super::*;
    use num::Zero;
    use crate::triangle::bell_number;

    #[test]
    fn test() {
        let decimal = Decimal::new(&bell_number(15));
        assert_eq!("1,382,958,545", decimal.grouped());
        assert_eq!(10, decimal.digit_count());
        assert_eq!(Ok("1.38296e+09".to_string()), decimal.scientific(5));

        let zero = Decimal::new(&BigUint::zero());
        assert_eq!("0", zero.grouped());
        assert_eq!(1, zero.digit_count());
        assert_eq!(Err(FormatError::Unsupported), zero.scientific(5));
    }
}


#[cfg(test)]
mod format_seconds {
    use super::*;

    #[test]
    fn test() {
        assert_eq!("1.500000e-03", format_seconds(Duration::from_micros(1500)));
        assert_eq!("2.000000e+00", format_seconds(Duration::from_secs(2)));
        assert_eq!("1.200000e+02", format_seconds(Duration::from_secs(120)));
        assert_eq!("0.000000e+00", format_seconds(Duration::ZERO));
    }
}
