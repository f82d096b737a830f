//! The `value` property of a quantity control.

/// A control's `value` property as the page reported it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlValue {
    /// Inputs, selects and textareas report their value as text.
    Text(String),

    /// A number, for custom controls that expose one.
    Number(f64),

    /// `null`, which browsers coerce to zero.
    Null,

    /// `undefined` or any other value, which browsers coerce to `NaN`.
    Undefined,
}

impl ControlValue {
    /// Classify a property read from the DOM.
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn from_js(value: &wasm_bindgen::JsValue) -> Self {
        if let Some(text) = value.as_string() {
            Self::Text(text)
        } else if let Some(number) = value.as_f64() {
            Self::Number(number)
        } else if value.is_null() {
            Self::Null
        } else {
            Self::Undefined
        }
    }

    /// Text that coerces to the number a browser would read from the value.
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) if number.is_nan() => "NaN".to_string(),
            Self::Number(number) if number.is_infinite() => {
                if number.is_sign_positive() {
                    "Infinity".to_string()
                } else {
                    "-Infinity".to_string()
                }
            }
            Self::Number(number) => number.to_string(),
            Self::Null => String::new(),
            Self::Undefined => "NaN".to_string(),
        }
    }
}
