use crate::capability::{Capability, Extension};
use std::fmt;

/// What one instruction or operand value needs declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    Capability(Capability),
    /// Any one of these, in preference order. Never empty.
    AlternativeCapabilities(Vec<Capability>),
    Extension(Extension),
    #[default]
    Empty,
}

impl Requirement {
    /// No capability, a single one, or a choice between several.
    pub fn any_of(caps: &[Capability]) -> Self {
        match caps {
            [] => Requirement::Empty,
            [cap] => Requirement::Capability(*cap),
            _ => Requirement::AlternativeCapabilities(caps.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Requirement::Empty)
    }
}

impl From<Capability> for Requirement {
    fn from(cap: Capability) -> Self {
        Requirement::Capability(cap)
    }
}

impl From<Extension> for Requirement {
    fn from(ext: Extension) -> Self {
        Requirement::Extension(ext)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Capability(cap) => write!(f, "capability {}", cap),
            Requirement::AlternativeCapabilities(caps) => {
                f.write_str("one of ")?;
                for (i, cap) in caps.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", cap)?;
                }
                Ok(())
            }
            Requirement::Extension(ext) => write!(f, "extension {}", ext),
            Requirement::Empty => f.write_str("nothing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_of_collapses_short_lists() {
        assert_eq!(Requirement::any_of(&[]), Requirement::Empty);
        assert_eq!(
            Requirement::any_of(&[Capability::Shader]),
            Requirement::Capability(Capability::Shader)
        );
        assert_eq!(
            Requirement::any_of(&[Capability::Shader, Capability::Kernel]),
            Requirement::AlternativeCapabilities(vec![Capability::Shader, Capability::Kernel])
        );
    }

    #[test]
    fn display() {
        let alt = Requirement::any_of(&[Capability::Sampled1D, Capability::Image1D]);
        assert_eq!(alt.to_string(), "one of Sampled1D | Image1D");
        assert_eq!(
            Requirement::from(Extension::KhrMultiview).to_string(),
            "extension SPV_KHR_multiview"
        );
        assert!(Requirement::default().is_empty());
    }
}
