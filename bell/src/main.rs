use bell::{
    cli::{Cli, CliError},
    report::{self, ConsoleProgress},
    triangle::{compute, CancelToken, Outcome},
};
use clap::Parser;
use log::{info, warn};
use signal_hook::{consts::*, iterator::Signals, low_level::emulate_default_handler};
use std::{
    fs::File,
    io::{self, BufWriter},
    process::exit,
    thread::{self, JoinHandle},
};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("bell: {e}");
        exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let n = cli.number()?;
    let config = cli.format_config();

    // 計算前に作成して、パスの誤りをすぐに報告する
    let mut output = match &cli.output {
        Some(path) => Some(BufWriter::new(File::create(path).map_err(CliError::Io)?)),
        None => None,
    };

    let header = report::header(n);
    for line in &header {
        println!("{line}");
    }

    let cancel = CancelToken::new();
    let (signals, handler) = spawn_sig_handler(cancel.clone()).map_err(CliError::Signal)?;

    let mut progress = ConsoleProgress::new(n, cli.quiet);
    let outcome = compute(n, &mut progress, &cancel);

    match &outcome {
        Outcome::Finished { value, elapsed } => {
            info!("finished Bell({n}) in {elapsed:?}, {} bits", value.bits())
        }
        Outcome::Aborted { elapsed } => info!("aborted Bell({n}) after {elapsed:?}"),
    }

    // 計算後に受信したシグナルでは即座に終了させる。
    // 巨大な値の整形中もシグナルハンドラは動かしたままにする
    cancel.cancel();
    let result = report::result(n, &outcome, &config);
    for line in &result {
        println!("{line}");
    }

    let written = match &mut output {
        Some(out) => report::write_report(out, &header, &result),
        None => Ok(()),
    };

    // シグナルハンドラスレッドを終了させる
    signals.close();
    if handler.join().is_err() {
        warn!("signal handler thread panicked");
    }

    if let Err(e) = written {
        warn!("failed to write the output file: {e}");
        return Err(CliError::Io(e));
    }

    Ok(())
}

/// signal_handler スレッド
///
/// SIGINT (Ctrl-C) と SIGTERM を受信したら計算を中断させる。
/// 中断済みのトークンで受信した場合は既定の動作 (終了) に従う。
fn spawn_sig_handler(
    cancel: CancelToken,
) -> io::Result<(signal_hook::iterator::Handle, JoinHandle<()>)> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let handle = signals.handle();
    let thread = thread::spawn(move || {
        for sig in signals.forever() {
            if cancel.is_cancelled() {
                info!("signal {sig} received, terminating");
                if let Err(e) = emulate_default_handler(sig) {
                    warn!("failed to terminate on signal {sig}: {e}");
                }
            } else {
                info!("signal {sig} received, aborting");
                cancel.cancel();
            }
        }
    });

    Ok((handle, thread))
}
