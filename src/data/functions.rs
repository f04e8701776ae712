//! Named fit functions and their validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Function names become identifiers on the backend, so no leading digit.
static FUNCTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("function name pattern"));

static PARAMETER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("parameter name pattern"));

static DEFAULT_FUNCTIONS: Lazy<Vec<FitFunction>> = Lazy::new(|| {
    vec![
        FitFunction::new("Exp_Decay", "A * exp(-x / tau) + C", "A=1.0, tau=100.0, C=0.5"),
        FitFunction::new(
            "Gaussian",
            "Amp * exp(-(x - mu)**2 / (2 * sigma**2))",
            "Amp=1.0, mu=0.0, sigma=1.0",
        ),
        FitFunction::new("Power_Law", "alpha * x**beta", "alpha=1.0, beta=0.7"),
        FitFunction::new("Linear", "m * x + b", "m=0.1, b=0.0"),
        FitFunction::new("Polynomial_2nd", "a * x**2 + b * x + c", "a=0.01, b=0.1, c=0.0"),
        FitFunction::new("Log_Growth", "K / (1 + exp(-r * (x - x0)))", "K=1.0, r=0.1, x0=0.0"),
    ]
});

/// The six example functions shown when no model is loaded.
pub fn default_functions() -> Vec<FitFunction> {
    DEFAULT_FUNCTIONS.clone()
}

/// A user-defined fit function as exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitFunction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub equation: String,
    /// Comma-separated `name=value` pairs.
    #[serde(default)]
    pub parameters: String,
}

/// A parsed `name=value` parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    pub name: String,
    pub value: f64,
}

/// Editable column of the function table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionField {
    Name,
    Equation,
    Parameters,
}

impl FitFunction {
    pub fn new(
        name: impl Into<String>,
        equation: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            equation: equation.into(),
            parameters: parameters.into(),
        }
    }

    pub fn field(&self, field: FunctionField) -> &str {
        match field {
            FunctionField::Name => &self.name,
            FunctionField::Equation => &self.equation,
            FunctionField::Parameters => &self.parameters,
        }
    }

    pub fn field_mut(&mut self, field: FunctionField) -> &mut String {
        match field {
            FunctionField::Name => &mut self.name,
            FunctionField::Equation => &mut self.equation,
            FunctionField::Parameters => &mut self.parameters,
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.equation.trim(), self.parameters.trim())
    }

    /// Check name, equation and parameter list; returns the parsed parameters.
    pub fn validate(&self) -> Result<Vec<FunctionParam>, ValidationError> {
        let name = self.name.trim();
        if !FUNCTION_NAME.is_match(name) {
            return Err(ValidationError::InvalidName {
                function: name.to_string(),
            });
        }
        if self.equation.trim().is_empty() {
            return Err(ValidationError::EmptyEquation {
                function: name.to_string(),
            });
        }
        parse_parameters(name, &self.parameters)
    }
}

/// Parse a `name=value, name=value` list. An empty list is valid.
pub fn parse_parameters(function: &str, text: &str) -> Result<Vec<FunctionParam>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(str::trim)
        .map(|piece| {
            let mut parts = piece.split('=');
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(ValidationError::MalformedParameter {
                    function: function.to_string(),
                    parameter: piece.to_string(),
                });
            };
            let (name, value) = (name.trim(), value.trim());
            if !PARAMETER_NAME.is_match(name) {
                return Err(ValidationError::InvalidParameterName {
                    function: function.to_string(),
                    parameter: name.to_string(),
                });
            }
            match value.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(FunctionParam {
                    name: name.to_string(),
                    value: v,
                }),
                _ => Err(ValidationError::NonNumericValue {
                    function: function.to_string(),
                    parameter: name.to_string(),
                }),
            }
        })
        .collect()
}

/// Ordered, editable list of fit functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTable {
    functions: Vec<FitFunction>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self {
            functions: default_functions(),
        }
    }
}

impl FunctionTable {
    pub fn from_functions(functions: Vec<FitFunction>) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &[FitFunction] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Append an empty row.
    pub fn add(&mut self) {
        self.functions.push(FitFunction::default());
    }

    /// Remove the last row; returns `false` when the table is already empty.
    pub fn remove_last(&mut self) -> bool {
        self.functions.pop().is_some()
    }

    /// Overwrite one field of the function at `index`.
    pub fn set_field(&mut self, index: usize, field: FunctionField, value: impl Into<String>) -> bool {
        match self.functions.get_mut(index) {
            Some(f) => {
                *f.field_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn replace(&mut self, functions: Vec<FitFunction>) {
        self.functions = functions;
    }

    pub fn reset(&mut self) {
        self.functions = default_functions();
    }

    /// Non-empty function names, in table order. These are the matrix options.
    pub fn names(&self) -> Vec<String> {
        self.functions
            .iter()
            .map(|f| f.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate every row, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for f in &self.functions {
            f.validate()?;
        }
        Ok(())
    }

    /// Rows as sent to the backend.
    pub fn to_payload(&self) -> Vec<FitFunction> {
        self.functions.iter().map(FitFunction::trimmed).collect()
    }
}
