use std::fmt;

use crate::form::ValidatedInput;

pub const ADVICE_INSTRUCTION: &str = "Berikan advice kesehatan casual. (maksimal 150 kata)";

/// The text sent to the generative model for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvicePrompt(String);

impl AdvicePrompt {
    /// Values are embedded as given; no unit conversion or numeric check happens here.
    pub fn build(height: &str, weight: &str) -> Self {
        Self(format!(
            "Seseorang dengan tinggi {height} cm dan berat {weight} kg. {ADVICE_INSTRUCTION}"
        ))
    }

    pub fn for_input(input: &ValidatedInput) -> Self {
        Self::build(input.height(), input.weight())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for AdvicePrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdvicePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormInput;

    #[test]
    fn builds_fixed_template() {
        let prompt = AdvicePrompt::build("170", "70");
        assert_eq!(
            prompt.as_str(),
            "Seseorang dengan tinggi 170 cm dan berat 70 kg. \
             Berikan advice kesehatan casual. (maksimal 150 kata)"
        );
    }

    #[test]
    fn embeds_values_and_instruction() {
        for (height, weight) in [("155.5", "48"), ("0", "-3"), ("1e2", "abc")] {
            let prompt = AdvicePrompt::build(height, weight);
            assert!(prompt.as_str().contains(&format!("tinggi {height} cm")));
            assert!(prompt.as_str().contains(&format!("berat {weight} kg")));
            assert!(prompt.as_str().ends_with(ADVICE_INSTRUCTION));
        }
    }

    #[test]
    fn uses_trimmed_form_values() {
        let input = FormInput::new(" 180 ", "75\n").validate().expect("valid");
        let prompt = AdvicePrompt::for_input(&input);
        assert!(prompt.as_str().starts_with("Seseorang dengan tinggi 180 cm dan berat 75 kg."));
    }
}
