//! Render model for the lookup screen.
//!
//! The host draws widgets; the core decides what text they show. Every
//! label the screen needs lives here so hosts on different platforms render
//! the same thing.

use std::fmt;

use crate::types::Address;

pub const TITLE: &str = "Consulta CEP";
pub const INPUT_PLACEHOLDER: &str = "Digite o CEP";
pub const BUTTON_LABEL: &str = "Buscar";

/// The three result lines shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLines {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
}

impl From<&Address> for ResultLines {
    fn from(address: &Address) -> Self {
        Self {
            street: format!("Logradouro: {}", address.street),
            neighborhood: format!("Bairro: {}", address.neighborhood),
            city: format!("Cidade: {}", address.city_line()),
        }
    }
}

/// Snapshot of everything the screen displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub input_placeholder: &'static str,
    pub input: String,
    pub button_label: &'static str,
    /// A lookup has been issued and not yet completed.
    pub loading: bool,
    pub error: Option<&'static str>,
    pub result: Option<ResultLines>,
}

impl FormView {
    pub(crate) fn new(
        input: &str,
        loading: bool,
        error: Option<&'static str>,
        address: Option<&Address>,
    ) -> Self {
        Self {
            title: TITLE,
            input_placeholder: INPUT_PLACEHOLDER,
            input: input.to_string(),
            button_label: BUTTON_LABEL,
            loading,
            error,
            result: address.map(ResultLines::from),
        }
    }
}

/// Plain-text rendering, one widget per line.
impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.input.is_empty() {
            writeln!(f, "[{}]", self.input_placeholder)?;
        } else {
            writeln!(f, "[{}]", self.input)?;
        }
        writeln!(f, "<{}>", self.button_label)?;
        if let Some(error) = self.error {
            writeln!(f, "{error}")?;
        }
        if let Some(result) = &self.result {
            writeln!(f, "{}", result.street)?;
            writeln!(f, "{}", result.neighborhood)?;
            writeln!(f, "{}", result.city)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paulista() -> Address {
        Address {
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state_code: "SP".to_string(),
            ..Address::default()
        }
    }

    #[test]
    fn result_lines_follow_screen_layout() {
        let lines = ResultLines::from(&paulista());
        assert_eq!(lines.street, "Logradouro: Avenida Paulista");
        assert_eq!(lines.neighborhood, "Bairro: Bela Vista");
        assert_eq!(lines.city, "Cidade: São Paulo - SP");
    }

    #[test]
    fn empty_view_shows_placeholder() {
        let view = FormView::new("", false, None, None);
        assert_eq!(view.to_string(), "Consulta CEP\n[Digite o CEP]\n<Buscar>\n");
    }

    #[test]
    fn view_with_result_renders_three_lines() {
        let address = paulista();
        let view = FormView::new("01310000", false, None, Some(&address));
        assert_eq!(
            view.to_string(),
            "Consulta CEP\n[01310000]\n<Buscar>\n\
             Logradouro: Avenida Paulista\nBairro: Bela Vista\nCidade: São Paulo - SP\n"
        );
    }

    #[test]
    fn view_with_error_renders_error_line() {
        let view = FormView::new("123", false, Some("CEP inválido. Deve conter 8 dígitos."), None);
        assert!(view.to_string().ends_with("<Buscar>\nCEP inválido. Deve conter 8 dígitos.\n"));
        assert!(view.result.is_none());
    }
}
