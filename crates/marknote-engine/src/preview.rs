use std::sync::Arc;

use crate::parsing::{ParseOptions, ParsedDoc, parse_document};

/// The block sequence currently shown for a document.
///
/// Each parse is tagged with a generation from [`Preview::begin`]. A result
/// is only installed if its generation is newer than the one on display, so
/// a slow parse finishing late cannot replace a newer result. Readers hold an
/// `Arc` to the sequence they were given; replacement never mutates it.
#[derive(Debug)]
pub struct Preview {
    options: ParseOptions,
    current: Arc<ParsedDoc>,
    issued: u64,
    applied: u64,
}

impl Preview {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            current: Arc::new(ParsedDoc::default()),
            issued: 0,
            applied: 0,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Changes the options used by later calls to [`Preview::update`].
    pub fn set_options(&mut self, options: ParseOptions) {
        self.options = options;
    }

    /// Reserves the generation number for a parse about to start.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Installs `doc` if `generation` is newer than the displayed one.
    /// Returns whether it was installed.
    pub fn apply(&mut self, generation: u64, doc: ParsedDoc) -> bool {
        if generation <= self.applied {
            log::debug!(
                "dropping stale preview generation {generation} (showing {})",
                self.applied
            );
            return false;
        }
        self.applied = generation;
        self.current = Arc::new(doc);
        true
    }

    /// Parses `text` with the current options and installs the result.
    pub fn update(&mut self, text: &str) {
        let generation = self.begin();
        let doc = parse_document(text, &self.options);
        self.apply(generation, doc);
    }

    pub fn clear(&mut self) {
        let generation = self.begin();
        self.apply(generation, ParsedDoc::default());
    }

    pub fn current(&self) -> Arc<ParsedDoc> {
        Arc::clone(&self.current)
    }

    /// Generation of the sequence on display, 0 before the first parse.
    pub fn generation(&self) -> u64 {
        self.applied
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}
