/// Advice mechanics: the ordered decision policy that turns a candidate's
/// gain and its neighbourhood into a verdict.
use std::fmt;

/// Best candidate found so far in one elicitation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Best {
    pub x: f64,
    pub gain: f64,
}

/// Summary of the scores on one side of a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub max: f64,
    pub avg: f64,
}

/// Neighbourhood of a candidate. A side is `None` when none of its
/// neighbours fell inside the gamble.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Probe {
    pub left: Option<Stats>,
    pub right: Option<Stats>,
}

/// Running max/mean over scores, folded into `Stats` at the end.
#[derive(Clone, Copy, Debug)]
pub struct Tally {
    sum: f64,
    count: usize,
    max: f64,
}

impl Default for Tally {
    fn default() -> Self {
        Self { sum: 0.0, count: 0, max: f64::NEG_INFINITY }
    }
}

impl Tally {
    #[inline]
    pub fn push(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
        self.max = self.max.max(score);
    }

    pub fn stats(&self) -> Option<Stats> {
        (self.count > 0).then(|| Stats { max: self.max, avg: self.sum / self.count as f64 })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    HighConfidence,
    CouldBeOptimal,
    MayBeOptimal,
    Decrease,
    Increase,
    ProbablyDecrease,
    ProbablyIncrease,
    MaybeDecrease,
    MaybeIncrease,
    TryAltering,
}

impl Verdict {
    /// Whether this verdict records the candidate as the new best.
    pub fn accepts(self) -> bool {
        matches!(self, Verdict::HighConfidence | Verdict::MayBeOptimal)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RETRY: &str = "Try another x: ";
        match self {
            Verdict::HighConfidence => write!(f, "There is high probability that this x is the best one."),
            Verdict::CouldBeOptimal => write!(f, "This x could be the best one."),
            Verdict::MayBeOptimal => write!(f, "This x may be the best one."),
            Verdict::Decrease => write!(f, "{RETRY}Decrease x to improve the game's result."),
            Verdict::Increase => write!(f, "{RETRY}Increase x to improve the game's result."),
            Verdict::ProbablyDecrease => write!(f, "{RETRY}Probably decrease x to improve the game's result."),
            Verdict::ProbablyIncrease => write!(f, "{RETRY}Probably increase x to improve the game's result."),
            Verdict::MaybeDecrease => write!(f, "{RETRY}Maybe decrease x to improve the game's result."),
            Verdict::MaybeIncrease => write!(f, "{RETRY}Maybe increase x to improve the game's result."),
            Verdict::TryAltering => write!(f, "{RETRY}Try to alter the x to improve the game's result."),
        }
    }
}

/// Ordered policy; the first matching rule wins.
///
/// `best` is the gain of the best candidate so far, `step` the spacing of the
/// probed neighbours (also the "close enough" margin of rule 2).
/// An empty side never beats `gain` and never blocks acceptance.
pub fn judge(gain: f64, probe: &Probe, best: Option<f64>, step: f64) -> Verdict {
    let (l, r) = (probe.left, probe.right);
    let beats_best = best.is_none_or(|b| gain >= b);

    // 1) nothing nearby scores higher
    let dominates = |s: Option<Stats>| s.is_none_or(|s| gain >= s.max);
    if beats_best && dominates(l) && dominates(r) {
        return Verdict::HighConfidence;
    }

    // 2) the best neighbour is barely ahead
    let barely_ahead = |a: Option<Stats>, b: Option<Stats>| {
        a.is_some_and(|a| a.max >= gain && a.max - gain <= step && b.is_none_or(|b| a.max >= b.max))
    };
    if beats_best && (barely_ahead(l, r) || barely_ahead(r, l)) {
        return Verdict::CouldBeOptimal;
    }

    // 3) at least as good as a typical neighbour
    let above_avg = |s: Option<Stats>| s.is_none_or(|s| gain >= s.avg);
    if beats_best && above_avg(l) && above_avg(r) {
        return Verdict::MayBeOptimal;
    }

    // 4) one side is clearly better
    let leads = |a: Option<Stats>, b: Option<Stats>| {
        a.is_some_and(|a| a.avg > gain && a.max > gain && b.is_none_or(|b| a.avg >= b.avg))
    };
    if leads(l, r) {
        return Verdict::Decrease;
    }
    if leads(r, l) {
        return Verdict::Increase;
    }

    // 5) one side is better on average
    let better = |s: Option<Stats>| s.is_some_and(|s| s.avg > gain);
    if better(l) {
        return Verdict::ProbablyDecrease;
    }
    if better(r) {
        return Verdict::ProbablyIncrease;
    }

    // 6) weak signal: lean toward the side whose average is closer
    match (l, r) {
        (Some(l), Some(r)) => {
            let (dl, dr) = ((l.avg - gain).abs(), (r.avg - gain).abs());
            if dl > dr {
                Verdict::MaybeIncrease
            } else if dr > dl {
                Verdict::MaybeDecrease
            } else {
                Verdict::TryAltering
            }
        }
        _ => Verdict::TryAltering,
    }
}
