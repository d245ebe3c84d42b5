/// A pending visit handed out by the frontier
///
/// `depth` is the depth of the page that linked here (0 for the seed); the
/// worker visits the URL at `depth + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub url: String,
    pub depth: u32,
}

impl Task {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// Depth at which the task's page is visited and recorded
    pub fn visit_depth(&self) -> u32 {
        self.depth.saturating_add(1)
    }
}
