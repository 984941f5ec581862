//! Request validation for the student contracts. Every rule is checked so the
//! caller sees all violated fields at once.

use crate::dto::{StudentCreateDto, StudentUpdateDto};
use crate::error::StudentError;
use crate::model::NewStudent;
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_MIN_LENGTH: usize = 3;

static CPF_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn cpf_regex() -> &'static Regex {
    CPF_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{11}$").unwrap_or_else(|error| panic!("cpf regex failed to compile: {error}"))
    })
}

// One '@', non-empty on both sides, no whitespace anywhere. Stricter than a
// bare single-'@' check: inner spaces are rejected too.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Collects violation messages in rule order.
#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    /// Returns the value as submitted, or `""` after recording a violation when
    /// it is absent or blank. Later rules skip `""`.
    fn required<'a>(&mut self, value: Option<&'a str>, message: &str) -> &'a str {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.0.push(message.to_string());
                ""
            }
        }
    }

    fn min_length(&mut self, value: &str, min: usize, message: &str) {
        if !value.is_empty() && value.chars().count() < min {
            self.0.push(message.to_string());
        }
    }

    fn pattern(&mut self, value: &str, re: &Regex, message: &str) {
        if !value.is_empty() && !re.is_match(value) {
            self.0.push(message.to_string());
        }
    }

    fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.0.push(message.to_string());
        }
    }

    /// `value` when no rule failed.
    fn finish<T>(self, value: T) -> Result<T, StudentError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(StudentError::Validation(self.0))
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create request and build the record to insert. Fields are
    /// stored exactly as submitted.
    pub fn validate_create(dto: &StudentCreateDto) -> Result<NewStudent, StudentError> {
        let mut v = Violations::default();
        let name = v.required(dto.name.as_deref(), "Nome é obrigatório");
        let email = v.required(dto.email.as_deref(), "Email é obrigatório");
        v.pattern(email, email_regex(), "Formato de e-mail inválido");
        let ra = v.required(dto.ra.as_deref(), "RA é obrigatório");
        let cpf = v.required(dto.cpf.as_deref(), "CPF é obrigatório");
        v.pattern(cpf, cpf_regex(), "CPF deve conter 11 dígitos numéricos");
        v.finish(NewStudent {
            name: name.to_string(),
            email: email.to_string(),
            ra: ra.to_string(),
            cpf: cpf.to_string(),
        })
    }

    /// Validate an update request. Returns the new (name, email).
    pub fn validate_update(dto: &StudentUpdateDto) -> Result<(String, String), StudentError> {
        let mut v = Violations::default();
        let name = v.required(dto.name.as_deref(), "Nome é obrigatório");
        v.min_length(name, NAME_MIN_LENGTH, "Nome deve ter pelo menos 3 caracteres");
        let email = v.required(dto.email.as_deref(), "Email é obrigatório");
        v.pattern(email, email_regex(), "Formato de e-mail inválido");
        v.finish((name.to_string(), email.to_string()))
    }

    /// Page and page size must both be at least one.
    pub fn validate_page(page: u32, page_size: u32) -> Result<(), StudentError> {
        let mut v = Violations::default();
        v.check(page >= 1, "Página deve ser maior ou igual a 1.");
        v.check(page_size >= 1, "Tamanho da página deve ser maior ou igual a 1.");
        v.finish(())
    }
}
