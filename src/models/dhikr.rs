use serde::{Deserialize, Serialize};

/// A single dhikr phrase with its recitation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhikrPhrase {
    pub text: String,
    pub target: u32,
}

impl DhikrPhrase {
    pub fn new(text: &str, target: u32) -> Self {
        Self {
            text: text.to_string(),
            target,
        }
    }
}

/// The classic post-salah set. Used whenever the content pack does not
/// supply its own adhkar list.
pub fn default_phrases() -> Vec<DhikrPhrase> {
    vec![
        DhikrPhrase::new("سبحان الله", 33),
        DhikrPhrase::new("الحمد لله", 33),
        DhikrPhrase::new("الله أكبر", 34),
        DhikrPhrase::new("لا إله إلا الله", 100),
        DhikrPhrase::new("أستغفر الله", 100),
    ]
}
