//! Aitken's array (ベル三角形) による Bell 数の計算。
//!
//! 0 行目を `[1]` とし、各行は直前の行から次のように作る。
//!
//! ```text
//! 1
//! 1  2
//! 2  3  5
//! 5  7 10 15
//! ```
//!
//! - 新しい行の先頭は直前の行の末尾
//! - 以降の要素は「左隣の要素」と「左上の要素」の和
//!
//! k 行目の先頭が Bell(k)、末尾が Bell(k + 1) となる。
use log::debug;
use num::{BigUint, One};
use std::{
    fmt::{self, Display},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// ベル三角形の 1 行。
///
/// 空の行は作れないので、 `first` と `last` は常に値を返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(Vec<BigUint>);

#[allow(clippy::len_without_is_empty)]
impl Row {
    /// 0 行目 `[1]` 。
    pub fn initial() -> Self {
        Row(vec![BigUint::one()])
    }

    /// 次の行を生成する。
    ///
    /// 自身の所有権を受け取り、各要素のバッファを加算結果に再利用する。
    pub fn next(self) -> Row {
        let mut next = Vec::with_capacity(self.0.len() + 1);
        next.push(self.last().clone());

        for (i, above) in self.0.into_iter().enumerate() {
            // 左上 + 左隣
            let sum = above + &next[i];
            next.push(sum);
        }

        Row(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> &BigUint {
        &self.0[0]
    }

    pub fn last(&self) -> &BigUint {
        &self.0[self.0.len() - 1]
    }

    #[cfg(test)]
    fn entries(&self) -> &[BigUint] {
        &self.0
    }

    /// 行を破棄して末尾の要素だけを取り出す。
    fn into_last(mut self) -> BigUint {
        match self.0.pop() {
            Some(last) => last,
            None => unreachable!("a row always has at least one entry"),
        }
    }
}

/// 計算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    EmptySet,       // n = 0
    NumberTriangle, // n >= 1
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::EmptySet => write!(f, "Empty set"),
            Method::NumberTriangle => write!(f, "Number triangle"),
        }
    }
}

/// 計算の進捗を受け取る。
///
/// 表示方法は呼び出し側が決める。
pub trait Progress {
    /// 計算方法が決まったときに一度だけ呼ばれる。
    fn method(&mut self, _method: Method) {}

    /// 行が完成するたびに呼ばれる。
    /// `index` はその行で得られた Bell 数の添字 (1 始まり)。
    fn row(&mut self, index: usize, bell: &BigUint);
}

/// 進捗を捨てる。
pub struct NoProgress;

impl Progress for NoProgress {
    fn row(&mut self, _index: usize, _bell: &BigUint) {}
}

impl<F> Progress for F
where
    F: FnMut(usize, &BigUint),
{
    fn row(&mut self, index: usize, bell: &BigUint) {
        self(index, bell)
    }
}

/// 計算の中断要求。
///
/// クローンはフラグを共有するので、シグナルハンドラのスレッドに渡して使う。
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 計算結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 計算完了
    Finished { value: BigUint, elapsed: Duration },
    /// 途中で中断された。途中の行は破棄される。
    Aborted { elapsed: Duration },
}

impl Outcome {
    pub fn elapsed(&self) -> Duration {
        match self {
            Outcome::Finished { elapsed, .. } | Outcome::Aborted { elapsed } => *elapsed,
        }
    }

    pub fn value(&self) -> Option<&BigUint> {
        match self {
            Outcome::Finished { value, .. } => Some(value),
            Outcome::Aborted { .. } => None,
        }
    }
}

/// n 番目の Bell 数を計算する。
///
/// 中断要求は 0 行目を作る前と、各行を作る前に確認する。
/// 中断された場合は `Outcome::Aborted` を返す。
///
/// # 利用例
///
/// ```
/// use bell::triangle::{compute, CancelToken, NoProgress, Outcome};
///
/// let outcome = compute(10, &mut NoProgress, &CancelToken::new());
/// assert_eq!(outcome.value().map(|v| v.to_string()), Some("115975".to_string()));
/// ```
pub fn compute<P>(n: usize, progress: &mut P, cancel: &CancelToken) -> Outcome
where
    P: Progress + ?Sized,
{
    let start = Instant::now();

    if n == 0 {
        // 空集合の分割は 1 通り
        debug!("n = 0, no triangle is built");
        progress.method(Method::EmptySet);
        return Outcome::Finished {
            value: BigUint::one(),
            elapsed: start.elapsed(),
        };
    }

    progress.method(Method::NumberTriangle);
    if cancel.is_cancelled() {
        debug!("cancelled before the first row");
        return Outcome::Aborted {
            elapsed: start.elapsed(),
        };
    }

    let mut row = Row::initial();
    progress.row(1, row.last());

    for index in 2..=n {
        if cancel.is_cancelled() {
            debug!("cancelled at Bell index {index} of {n}");
            return Outcome::Aborted {
                elapsed: start.elapsed(),
            };
        }

        row = row.next();
        progress.row(index, row.last());
    }

    Outcome::Finished {
        value: row.into_last(),
        elapsed: start.elapsed(),
    }
}

/// 中断も進捗通知もなしで n 番目の Bell 数を計算する。
pub fn bell_number(n: usize) -> BigUint {
    match compute(n, &mut NoProgress, &CancelToken::new()) {
        Outcome::Finished { value, .. } => value,
        Outcome::Aborted { .. } => unreachable!("a fresh token is never cancelled"),
    }
}

#[cfg(test)]
mod row {
    use super::*;

    fn values(row: &Row) -> Vec<u64> {
        row.entries()
            .iter()
            .map(|v| v.to_string().parse().unwrap())
            .collect()
    }

    #[test]
    fn test() {
        let r0 = Row::initial();
        assert_eq!(vec![1], values(&r0));
        let r1 = r0.next();
        assert_eq!(vec![1, 2], values(&r1));
        let r2 = r1.next();
        assert_eq!(vec![2, 3, 5], values(&r2));
        let r3 = r2.next();
        assert_eq!(vec![5, 7, 10, 15], values(&r3));
        let r4 = r3.next();
        assert_eq!(vec![15, 20, 27, 37, 52], values(&r4));
    }

    #[test]
    fn length_and_handoff() {
        let mut row = Row::initial();
        for k in 1..50 {
            let prev_last = row.last().clone();
            row = row.next();
            assert_eq!(k + 1, row.len());
            assert_eq!(&prev_last, row.first());
        }
    }
}
