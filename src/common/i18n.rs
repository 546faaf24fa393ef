// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

// Catálogo de mensagens de erro por idioma.
// A chave é estável (vem do AppError), o texto muda conforme o Accept-Language.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();

        messages.insert(
            "en",
            HashMap::from([
                ("FETCH_FAILED", "Failed to fetch {resource}."),
                ("INVALID_CREDENTIALS", "Invalid username or password."),
                ("INVALID_TOKEN", "Missing or invalid authentication token."),
                ("SESSION_EXPIRED", "Your session has ended. Please log in again."),
                ("VALIDATION_ERROR", "One or more fields are invalid."),
                ("INTERNAL_ERROR", "An unexpected error occurred."),
            ]),
        );

        messages.insert(
            "pt",
            HashMap::from([
                ("FETCH_FAILED", "Falha ao buscar {resource}."),
                ("INVALID_CREDENTIALS", "Usuário ou senha inválidos."),
                ("INVALID_TOKEN", "Token de autenticação inválido ou ausente."),
                ("SESSION_EXPIRED", "Sua sessão terminou. Faça login novamente."),
                ("VALIDATION_ERROR", "Um ou mais campos são inválidos."),
                ("INTERNAL_ERROR", "Ocorreu um erro inesperado."),
            ]),
        );

        messages.insert(
            "pl",
            HashMap::from([
                ("FETCH_FAILED", "Nie udało się pobrać: {resource}."),
                ("INVALID_CREDENTIALS", "Nieprawidłowa nazwa użytkownika lub hasło."),
                ("INVALID_TOKEN", "Brak lub nieprawidłowy token uwierzytelniający."),
                ("SESSION_EXPIRED", "Sesja wygasła. Zaloguj się ponownie."),
                ("VALIDATION_ERROR", "Co najmniej jedno pole jest nieprawidłowe."),
                ("INTERNAL_ERROR", "Wystąpił nieoczekiwany błąd."),
            ]),
        );

        Self { messages }
    }

    /// Busca a mensagem no idioma pedido, caindo para inglês, e por fim para a própria chave.
    /// Cada par `(nome, valor)` em `args` substitui `{nome}` no texto.
    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .messages
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .copied()
            .unwrap_or(key);

        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
