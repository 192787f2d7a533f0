/// Blend factor applied to one side of the blend equation.
///
/// The set is closed; every backend must be able to express each value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    DstAlpha,
    OneMinusSrcAlpha,
    OneMinusDstAlpha,
}

/// Porter-Duff composite rule used when drawing a source onto a destination.
///
/// Colors are premultiplied, so `SourceOver` is `(One, OneMinusSrcAlpha)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    Clear,
    Copy,
    Destination,
    DestinationOver,
    SourceIn,
    DestinationIn,
    SourceOut,
    DestinationOut,
    SourceAtop,
    DestinationAtop,
    Xor,
    Lighter,
}

impl CompositeMode {
    /// Every mode, in declaration order. `ALL[m.index()] == m`.
    pub const ALL: [CompositeMode; 13] = [
        CompositeMode::SourceOver,
        CompositeMode::Clear,
        CompositeMode::Copy,
        CompositeMode::Destination,
        CompositeMode::DestinationOver,
        CompositeMode::SourceIn,
        CompositeMode::DestinationIn,
        CompositeMode::SourceOut,
        CompositeMode::DestinationOut,
        CompositeMode::SourceAtop,
        CompositeMode::DestinationAtop,
        CompositeMode::Xor,
        CompositeMode::Lighter,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Dense index into per-mode tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the `(source, destination)` blend factors for this mode.
    ///
    /// The same pair is used for the color and alpha channels.
    pub const fn factors(self) -> (BlendFactor, BlendFactor) {
        use BlendFactor::*;
        match self {
            CompositeMode::SourceOver => (One, OneMinusSrcAlpha),
            CompositeMode::Clear => (Zero, Zero),
            CompositeMode::Copy => (One, Zero),
            CompositeMode::Destination => (Zero, One),
            CompositeMode::DestinationOver => (OneMinusDstAlpha, One),
            CompositeMode::SourceIn => (DstAlpha, Zero),
            CompositeMode::DestinationIn => (Zero, SrcAlpha),
            CompositeMode::SourceOut => (OneMinusDstAlpha, Zero),
            CompositeMode::DestinationOut => (Zero, OneMinusSrcAlpha),
            CompositeMode::SourceAtop => (DstAlpha, OneMinusSrcAlpha),
            CompositeMode::DestinationAtop => (OneMinusDstAlpha, SrcAlpha),
            CompositeMode::Xor => (OneMinusDstAlpha, OneMinusSrcAlpha),
            CompositeMode::Lighter => (One, One),
        }
    }

    /// Short lowercase name, used in pipeline labels and logs.
    pub const fn name(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::Clear => "clear",
            CompositeMode::Copy => "copy",
            CompositeMode::Destination => "destination",
            CompositeMode::DestinationOver => "destination-over",
            CompositeMode::SourceIn => "source-in",
            CompositeMode::DestinationIn => "destination-in",
            CompositeMode::SourceOut => "source-out",
            CompositeMode::DestinationOut => "destination-out",
            CompositeMode::SourceAtop => "source-atop",
            CompositeMode::DestinationAtop => "destination-atop",
            CompositeMode::Xor => "xor",
            CompositeMode::Lighter => "lighter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BlendFactor::*;

    #[test]
    fn all_is_indexed_by_index() {
        for (i, mode) in CompositeMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    #[test]
    fn default_is_source_over() {
        assert_eq!(CompositeMode::default(), CompositeMode::SourceOver);
    }

    #[test]
    fn factors_match_porter_duff_table() {
        let expected = [
            (CompositeMode::SourceOver, (One, OneMinusSrcAlpha)),
            (CompositeMode::Clear, (Zero, Zero)),
            (CompositeMode::Copy, (One, Zero)),
            (CompositeMode::Destination, (Zero, One)),
            (CompositeMode::DestinationOver, (OneMinusDstAlpha, One)),
            (CompositeMode::SourceIn, (DstAlpha, Zero)),
            (CompositeMode::DestinationIn, (Zero, SrcAlpha)),
            (CompositeMode::SourceOut, (OneMinusDstAlpha, Zero)),
            (CompositeMode::DestinationOut, (Zero, OneMinusSrcAlpha)),
            (CompositeMode::SourceAtop, (DstAlpha, OneMinusSrcAlpha)),
            (CompositeMode::DestinationAtop, (OneMinusDstAlpha, SrcAlpha)),
            (CompositeMode::Xor, (OneMinusDstAlpha, OneMinusSrcAlpha)),
            (CompositeMode::Lighter, (One, One)),
        ];
        assert_eq!(expected.len(), CompositeMode::COUNT);
        for (mode, factors) in expected {
            assert_eq!(mode.factors(), factors, "{}", mode.name());
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = CompositeMode::ALL.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CompositeMode::COUNT);
    }
}
