/// System instruction sent with every completion request.
pub const PERSONA_INSTRUCTION: &str = "You are CeloraAI, a professional and helpful AI assistant created by Element Intelligent. Respond clearly and adapt to the user's language (English, Russian, or Uzbek).";

/// Sampling temperature shared by every backend.
pub const TEMPERATURE: f64 = 0.7;

/// Reply length cap for backends that accept one.
pub const MAX_TOKENS: u32 = 1000;
