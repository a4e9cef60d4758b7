use rand::Rng;
use serde::{Deserialize, Serialize};

const QUOTES: [&str; 20] = [
    "The secret of getting ahead is getting started.",
    "Focus on being productive instead of busy.",
    "You don't have to be great to start, but you have to start to be great.",
    "Small daily improvements over time lead to stunning results.",
    "The only way to do great work is to love what you do.",
    "Your limitation—it's only your imagination.",
    "Push yourself, because no one else is going to do it for you.",
    "Great things never come from comfort zones.",
    "Dream it. Wish it. Do it.",
    "Success doesn't just find you. You have to go out and get it.",
    "The harder you work for something, the greater you'll feel when you achieve it.",
    "Dream bigger. Do bigger.",
    "Don't stop when you're tired. Stop when you're done.",
    "Wake up with determination. Go to bed with satisfaction.",
    "Do something today that your future self will thank you for.",
    "Little things make big days.",
    "It's going to be hard, but hard does not mean impossible.",
    "Don't wait for opportunity. Create it.",
    "Sometimes we're tested not to show our weaknesses, but to discover our strengths.",
    "The key to success is to focus on goals, not obstacles.",
];

/// Quote of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub id: usize,
    pub text: String,
}

impl Quote {
    /// Quote at a catalog index (wraps around)
    pub fn from_catalog(id: usize) -> Self {
        let id = id % QUOTES.len();
        Self {
            id,
            text: QUOTES[id].to_string(),
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::from_catalog(0)
    }
}

/// Uniform pick; repeats across days are allowed
pub fn random_quote() -> Quote {
    Quote::from_catalog(rand::thread_rng().gen_range(0..QUOTES.len()))
}
