pub const HEIGHT_REQUIRED: &str = "Tinggi badan harus diisi";
pub const WEIGHT_REQUIRED: &str = "Berat badan harus diisi";

/// Raw text of the two form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub height: String,
    pub weight: String,
}

impl FormInput {
    pub fn new(height: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            height: height.into(),
            weight: weight.into(),
        }
    }

    /// Presence check only. Surrounding whitespace does not count as a value;
    /// the content itself is not inspected.
    pub fn validate(&self) -> Result<ValidatedInput, FieldErrors> {
        let height = self.height.trim();
        let weight = self.weight.trim();
        let errors = FieldErrors {
            height: height.is_empty().then_some(HEIGHT_REQUIRED),
            weight: weight.is_empty().then_some(WEIGHT_REQUIRED),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidatedInput {
            height: height.to_string(),
            weight: weight.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub height: Option<&'static str>,
    pub weight: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.weight.is_none()
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> {
        self.height.into_iter().chain(self.weight)
    }
}

/// A form that passed [`FormInput::validate`]; both values are non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    height: String,
    weight: String,
}

impl ValidatedInput {
    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_fields_present() {
        let valid = FormInput::new("170", "70").validate().expect("valid");
        assert_eq!(valid.height(), "170");
        assert_eq!(valid.weight(), "70");
    }

    #[test]
    fn reports_missing_height_only() {
        let errors = FormInput::new("", "70").validate().unwrap_err();
        assert_eq!(errors.height, Some(HEIGHT_REQUIRED));
        assert_eq!(errors.weight, None);
    }

    #[test]
    fn reports_missing_weight_only() {
        let errors = FormInput::new("170", "").validate().unwrap_err();
        assert_eq!(errors.height, None);
        assert_eq!(errors.weight, Some(WEIGHT_REQUIRED));
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let errors = FormInput::new("   ", "\t").validate().unwrap_err();
        assert_eq!(
            errors.messages().collect::<Vec<_>>(),
            vec![HEIGHT_REQUIRED, WEIGHT_REQUIRED]
        );
    }

    #[test]
    fn non_numeric_text_still_passes_presence_check() {
        let valid = FormInput::new(" tinggi ", "berat").validate().expect("valid");
        assert_eq!(valid.height(), "tinggi");
        assert_eq!(valid.weight(), "berat");
    }
}
