//! Domain-level constants.
//!
//! These constants define business rules, validation requirements and the
//! user-facing messages attached to domain failures.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Messages
// =============================================================================

/// Returned when a user id does not resolve to a stored user
pub const MSG_USER_NOT_FOUND: &str = "Usuário não encontrado.";

/// Returned when an email is already taken by another user
pub const MSG_EMAIL_ALREADY_EXISTS: &str = "Esse e-mail já existe.";

/// Returned when an update request carries no usable field
pub const MSG_FIELDS_NULL: &str =
    "Todos os campos estão nulos. Pelo menos um campo deve ser preenchido.";

/// Returned when the request body is missing or cannot be parsed
pub const MSG_MALFORMED_BODY: &str = "Corpo da requisição ausente ou malformado.";

/// Returned when a path parameter has the wrong type
pub const MSG_INVALID_PATH_PARAMETER: &str = "Parâmetro de URL inválido.";

/// Returned when a password is below `MIN_PASSWORD_LENGTH`
pub const MSG_PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 8 caracteres.";
