use crate::fx::Fx;

/// Failures reported by the checked entry points. The unchecked kernel
/// functions never fail; they wrap silently like the integer math they use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseError {
    OutOfDomain { x: Fx, y: Fx },
    NegativeSqrt(Fx),
    InvalidConfig(&'static str),
}

impl NoiseError {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfDomain { .. } => "out_of_domain",
            Self::NegativeSqrt(_) => "negative_sqrt",
            Self::InvalidConfig(reason) => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoiseError;
    use crate::fx::Fx;

    #[test]
    fn labels_are_stable_log_tokens() {
        let oob = NoiseError::OutOfDomain {
            x: Fx::from_int(-1),
            y: Fx::ZERO,
        };
        assert_eq!(oob.label(), "out_of_domain");
        assert_eq!(NoiseError::NegativeSqrt(Fx::from_int(-4)).label(), "negative_sqrt");
        assert_eq!(
            NoiseError::InvalidConfig("cell_px must be > 0").label(),
            "cell_px must be > 0"
        );
    }
}
