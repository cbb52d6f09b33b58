//! Performance-based motivational quotes.

use rand::seq::SliceRandom;

/// A quote and the band label shown under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub tag: &'static str,
}

/// Performance band of a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn for_pct(pct: u8) -> Self {
        match pct {
            80..=u8::MAX => Band::High,
            40..=79 => Band::Medium,
            _ => Band::Low,
        }
    }

    pub fn quotes(&self) -> &'static [Quote] {
        match self {
            Band::High => HIGH,
            Band::Medium => MEDIUM,
            Band::Low => LOW,
        }
    }
}

/// Pick a random quote for the band `pct` falls in
pub fn pick_quote(pct: u8) -> &'static Quote {
    let pool = Band::for_pct(pct).quotes();
    // pools are never empty
    pool.choose(&mut rand::thread_rng()).unwrap_or(&pool[0])
}

const fn q(text: &'static str, tag: &'static str) -> Quote {
    Quote { text, tag }
}

const HIGH: &[Quote] = &[
    q("Discipline is the bridge between goals and accomplishment.", "High Performance"),
    q("You don't rise to the level of your goals, you fall to the level of your systems.", "High Performance"),
    q("Excellence is not a destination but a continuous journey.", "High Performance"),
    q("The secret of your future is hidden in your daily routine.", "High Performance"),
    q("Consistency is the hallmark of the unbroken.", "High Performance"),
    q("Small daily improvements over time lead to stunning results.", "High Performance"),
    q("Win the morning, win the day.", "High Performance"),
];

const MEDIUM: &[Quote] = &[
    q("Progress, not perfection, is the goal.", "Keep Going"),
    q("Every step forward is a step in the right direction.", "Keep Going"),
    q("You are further along than you were yesterday.", "Keep Going"),
    q("Momentum is built one completed task at a time.", "Keep Going"),
    q("Half done is infinitely better than never started.", "Keep Going"),
    q("The middle of the journey is where most people quit. Don't.", "Keep Going"),
    q("Effort today is the investment for tomorrow's results.", "Keep Going"),
];

const LOW: &[Quote] = &[
    q("Today was hard. Tomorrow is a fresh start.", "Start Fresh"),
    q("A journey of a thousand miles begins with a single step.", "Start Fresh"),
    q("The best time to start was yesterday. The second best is now.", "Start Fresh"),
    q("Every master was once a beginner who refused to give up.", "Start Fresh"),
    q("Your only competition is who you were yesterday.", "Start Fresh"),
    q("Rest if you must, but don't quit.", "Start Fresh"),
    q("One task done today is one more than zero.", "Start Fresh"),
];
