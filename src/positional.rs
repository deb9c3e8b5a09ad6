/// A value identified by its position relative to the command that owns it.
#[derive(Debug)]
pub struct Positional<'a> {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) position: usize,
    pub(crate) required: bool,
    pub(crate) hidden: bool,
    pub(crate) found: bool,
    pub(crate) target: &'a mut String,
}

impl<'a> Positional<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 1-based position among the non-flag arguments following the owning command.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the last parse supplied this value.
    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Leaves this value out of help output.
    pub fn hide(&mut self) -> &mut Self {
        self.hidden = true;
        self
    }

    pub(crate) fn current(&self) -> &str {
        self.target
    }
}
