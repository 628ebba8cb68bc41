/// Text the host shows next to the image. The core never renders text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    pub cursor: String,
    pub offset: String,
    pub zoom: String,
    pub iterations: String,
    pub samples: String,
    pub batch_width: String,
    pub jobs: String,
    pub refine: String,
    pub state: String,
}

impl Diagnostics {
    #[must_use]
    pub fn lines(&self) -> [&str; 9] {
        [
            &self.cursor,
            &self.offset,
            &self.zoom,
            &self.iterations,
            &self.samples,
            &self.batch_width,
            &self.jobs,
            &self.refine,
            &self.state,
        ]
    }
}
