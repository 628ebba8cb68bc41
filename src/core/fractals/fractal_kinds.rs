#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKinds {
    Mandelbrot,
    #[default]
    Julia,
}

impl FractalKinds {
    pub const ALL: &'static [Self] = &[Self::Julia, Self::Mandelbrot];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Mandelbrot => Self::Julia,
            Self::Julia => Self::Mandelbrot,
        }
    }

    /// Whether the cursor position feeds the iteration as the parameter `c`.
    #[must_use]
    pub const fn follows_cursor(self) -> bool {
        matches!(self, Self::Julia)
    }
}

impl std::fmt::Display for FractalKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
