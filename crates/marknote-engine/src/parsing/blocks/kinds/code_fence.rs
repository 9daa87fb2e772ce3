#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSig {
    Backticks,
    Tildes,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Returns the fence signature if the trimmed line opens or closes a fence.
    ///
    /// Any signature toggles fence state; a `~~~` line closes a region opened
    /// by backticks and vice versa.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim();
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceSig::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceSig::Tildes)
        } else {
            None
        }
    }
}
