//! 計算結果の文面を組み立てる。
use crate::{
    format::{format_exact, format_seconds, group_digits, Decimal, FormatConfig},
    triangle::{Method, Outcome, Progress},
};
use log::trace;
use num::BigUint;
use std::io::{self, Write};

/// 序数表記。 1st, 2nd, 3rd, 4th, 11th, 21st, 1,000th など。
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{suffix}", group_digits(&n.to_string()))
}

/// 求める Bell 数の説明
pub fn description(n: usize) -> String {
    if n == 0 {
        "Bell number of the empty set (set with 0 elements)".to_string()
    } else {
        format!("{} Bell number", ordinal(n))
    }
}

/// 計算開始前に表示する行
pub fn header(n: usize) -> Vec<String> {
    vec![format!("Computing the {}...", description(n)), String::new()]
}

/// 計算結果の行。進捗表示は含まない。
pub fn result(n: usize, outcome: &Outcome, config: &FormatConfig) -> Vec<String> {
    let mut lines = vec![String::new()];
    match outcome {
        Outcome::Finished { value, elapsed } => {
            // 10 進変換は一度だけ
            let decimal = Decimal::new(value);
            lines.push(format!("The {} is:", description(n)));
            lines.push(decimal.grouped());
            if config.should_show_scientific(value) {
                if let Ok(sci) = decimal.scientific(config.precision()) {
                    lines.push(format!(
                        "Approximately {sci} ({} digits)",
                        group_digits(&decimal.digit_count().to_string())
                    ));
                }
            }
            lines.push(String::new());
            lines.push(format!("Computed in {} seconds", format_seconds(*elapsed)));
        }
        Outcome::Aborted { elapsed } => {
            lines.push(format!("Aborted after {} seconds", format_seconds(*elapsed)));
        }
    }
    lines
}

/// 出力ファイル用に、進捗表示を除いた文面を書き出す。
pub fn write_report<W: Write>(
    out: &mut W,
    header: &[String],
    result: &[String],
) -> io::Result<()> {
    for line in header.iter().chain(result) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// 進捗を標準出力に表示する。
///
/// quiet の場合は表示せず trace ログに流す。
pub struct ConsoleProgress {
    width: usize, // 行番号の表示幅
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(n: usize, quiet: bool) -> Self {
        Self {
            width: group_digits(&n.to_string()).len(),
            quiet,
        }
    }

    /// `  7 -> 877` のような 1 行
    pub fn row_line(&self, index: usize, bell: &BigUint) -> String {
        let index = group_digits(&index.to_string());
        format!("{index:>width$} -> {}", format_exact(bell), width = self.width)
    }
}

impl Progress for ConsoleProgress {
    fn method(&mut self, method: Method) {
        if self.quiet {
            trace!("method: {method}");
        } else {
            println!("Method: {method}");
        }
    }

    fn row(&mut self, index: usize, bell: &BigUint) {
        if self.quiet {
            trace!("row {index} complete");
        } else {
            println!("{}", self.row_line(index, bell));
        }
    }
}
