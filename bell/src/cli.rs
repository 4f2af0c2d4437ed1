//! コマンドライン引数
use crate::format::{
    FormatConfig, MANTISSA_PRECISION, MAX_PRECISION, MAX_THRESHOLD_EXP, SCIENTIFIC_THRESHOLD_EXP,
};
use clap::Parser;
use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

#[derive(Parser, Debug)]
#[command(name = "bell")]
#[command(version)]
#[command(about = "Compute the nth Bell number using Aitken's array")]
pub struct Cli {
    /// Index of the Bell number to compute
    #[arg(value_name = "N", allow_negative_numbers = true, conflicts_with = "number")]
    n: Option<i64>,

    /// Index of the Bell number to compute (same as <N>)
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    number: Option<i64>,

    /// Also write the result to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not print a line for every row of the triangle
    #[arg(short, long)]
    pub quiet: bool,

    /// Digits after the decimal point in the scientific notation
    #[arg(
        long,
        value_name = "DIGITS",
        default_value_t = MANTISSA_PRECISION as u16,
        value_parser = clap::value_parser!(u16).range(0..=MAX_PRECISION as i64)
    )]
    pub precision: u16,

    /// Show the scientific notation only for values above 10^EXP
    #[arg(
        long,
        value_name = "EXP",
        default_value_t = SCIENTIFIC_THRESHOLD_EXP,
        value_parser = clap::value_parser!(u32).range(0..=MAX_THRESHOLD_EXP as i64)
    )]
    pub threshold_exp: u32,
}

impl Cli {
    /// 計算する Bell 数の添字を取り出す。
    pub fn number(&self) -> Result<usize, CliError> {
        let n = match (self.n, self.number) {
            (Some(n), _) | (None, Some(n)) => n,
            (None, None) => return Err(CliError::Usage("missing <N>".to_string())),
        };
        if n < 0 {
            return Err(CliError::Domain(n));
        }
        usize::try_from(n).map_err(|_| CliError::Usage(format!("{n} is too large")))
    }

    pub fn format_config(&self) -> FormatConfig {
        FormatConfig::new(self.threshold_exp, usize::from(self.precision))
    }
}

/// コマンドラインで起きるエラーを表す型
#[derive(Debug)]
pub enum CliError {
    Usage(String),     // 引数の誤り
    Domain(i64),       // 負の数
    Io(io::Error),     // 出力ファイルの書き込み失敗
    Signal(io::Error), // シグナルハンドラの登録失敗
}

impl CliError {
    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Domain(_) => 2,
            CliError::Io(_) | CliError::Signal(_) => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}\nusage: bell <N> [--output <PATH>]"),
            CliError::Domain(_) => write!(f, "Number must be greater than or equal to zero"),
            CliError::Io(e) => write!(f, "failed to write the result: {e}"),
            CliError::Signal(e) => write!(f, "failed to install the signal handler: {e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Io(e) | CliError::Signal(e) => Some(e),
            _ => None,
        }
    }
}


#[cfg(test)]
mod options {
    use super::*;
    use num::BigUint;

    #[test]
    fn test() {
        let cli = Cli::try_parse_from(["bell", "20", "-q", "-o", "out.txt"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(Some(PathBuf::from("out.txt")), cli.output);
        assert_eq!(FormatConfig::default(), cli.format_config());
    }

    #[test]
    fn format_config() {
        let cli =
            Cli::try_parse_from(["bell", "20", "--precision", "3", "--threshold-exp", "2"])
                .unwrap();
        let config = cli.format_config();
        assert_eq!(3, config.precision());
        assert_eq!(&BigUint::from(100u32), config.threshold());
    }

    #[test]
    fn limits() {
        let max_precision = MAX_PRECISION.to_string();
        let max_exp = MAX_THRESHOLD_EXP.to_string();
        let cli = Cli::try_parse_from([
            "bell",
            "15",
            "--precision",
            max_precision.as_str(),
            "--threshold-exp",
            max_exp.as_str(),
        ])
        .unwrap();
        let config = cli.format_config();
        assert_eq!(MAX_PRECISION, config.precision());
        assert!(!config.should_show_scientific(&BigUint::from(1_382_958_545u32)));
        assert!(config.scientific(&BigUint::from(1_382_958_545u32)).is_ok());
    }

    #[test]
    fn out_of_range() {
        let too_precise = (MAX_PRECISION + 1).to_string();
        let too_large = (MAX_THRESHOLD_EXP + 1).to_string();
        for args in [
            vec!["bell", "15", "--precision", "18446744073709551615"],
            vec!["bell", "15", "--precision", too_precise.as_str()],
            vec!["bell", "15", "--precision", "-1"],
            vec!["bell", "15", "--threshold-exp", "4000000000"],
            vec!["bell", "15", "--threshold-exp", too_large.as_str()],
        ] {
            let err = Cli::try_parse_from(&args).unwrap_err();
            assert_eq!(2, err.exit_code(), "{args:?}");
        }
    }
}
