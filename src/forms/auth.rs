use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::forms::{FormError, invalid};
use crate::models::auth::{LoginRequest, RegisterRequest};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Debe ser un email válido"))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

impl LoginForm {
    pub fn into_request(self) -> Result<LoginRequest, FormError> {
        let form = Self {
            email: self.email.trim().to_lowercase(),
            password: self.password,
        };
        form.validate()?;
        Ok(LoginRequest {
            email: form.email,
            password: form.password,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match", skip_on_field_errors = false))]
pub struct RegisterForm {
    #[validate(email(message = "Debe ser un email válido"))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "El nombre debe tener al menos 2 caracteres"))]
    pub name: Option<String>,
}

fn validate_passwords_match(form: &RegisterForm) -> Result<(), ValidationError> {
    if form.password == form.confirm_password {
        Ok(())
    } else {
        Err(invalid("confirm_password", "Las contraseñas no coinciden"))
    }
}

impl RegisterForm {
    pub fn into_request(self) -> Result<RegisterRequest, FormError> {
        let form = Self {
            email: self.email.trim().to_lowercase(),
            name: self
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            ..self
        };
        form.validate()?;
        Ok(RegisterRequest {
            email: form.email,
            password: form.password,
            name: form.name,
        })
    }
}
