//! Rule-based replies used when the LLM is unavailable.
//!
//! Keyword matching over the lowercased message; the first matching rule
//! wins. Covers greetings, small talk and the common administrative
//! procedures (passport, identity card, residence certificate).

/// Reply for an empty question.
pub const CLARIFY_REPLY: &str = "Pouvez-vous préciser votre question ?";

const GREETINGS: &[&str] = &["bonjour", "bonsoir", "salut", "bjr", "slt", "salam", "hey", "coucou"];

/// A short message containing a greeting word.
///
/// More than three words is treated as a real question that happens to
/// start politely.
pub fn is_greeting(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    GREETINGS.iter().any(|g| t.contains(g)) && t.split_whitespace().count() <= 3
}

pub(crate) fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Best local answer to `message`.
pub fn local_reply(message: &str) -> String {
    let text = message.trim().to_lowercase();
    if text.is_empty() {
        return CLARIFY_REPLY.to_string();
    }

    let reply = if is_greeting(&text) {
        "Salut !\n\
         Je peux vous aider pour vos démarches administratives : passeport, carte d'identité, certificat, etc."
    } else if contains_any(&text, &["ça va", "comment tu vas", "comment vas-tu", "comment va tu"]) {
        "Je vais bien, merci. Je suis prêt à vous aider pour vos démarches. De quoi avez-vous besoin ?"
    } else if text.contains("passeport")
        && contains_any(&text, &["document", "papier", "pièce", "pieces"])
    {
        "Pour le passeport biométrique, les pièces classiques sont :\n\
         - Un extrait de naissance\n\
         - Une pièce d'identité (si vous en avez déjà)\n\
         - Des photos d'identité aux normes\n\
         - Un justificatif de domicile (selon le pays)"
    } else if text.contains("passeport")
        && contains_any(&text, &["delai", "délai", "temps", "long"])
    {
        "Le délai de délivrance du passeport varie selon la période et le centre.\n\
         En général il faut prévoir plusieurs jours à quelques semaines."
    } else if text.contains("passeport") {
        "Pour le passeport biométrique :\n\
         1. Préparez vos pièces (extrait de naissance, photos, justificatif de domicile…)\n\
         2. Prenez rendez-vous dans un centre habilité\n\
         3. Déposez votre dossier\n\
         4. Suivez l'avancement sur votre tableau de bord Clarus."
    } else if contains_any(&text, &["carte d'identité", "carte d identite", "cni", "identité"]) {
        "La carte d'identité se fait en mairie ou centre spécialisé.\n\
         On demande souvent : extrait de naissance, justificatif de domicile, et photos d'identité."
    } else if contains_any(&text, &["certificat de résidence", "certificat de residence", "résidence"]) {
        "Le certificat de résidence est généralement délivré par la mairie de votre quartier.\n\
         Il sert à prouver votre domicile pour d'autres démarches."
    } else if contains_any(&text, &["merci", "thanks", "thx"]) {
        "Avec plaisir ! N'hésitez pas si vous avez d'autres questions."
    } else {
        "Je ne suis pas sûr de comprendre votre demande.\n\
         Pouvez-vous préciser la démarche ou le document (passeport, carte d'identité, certificat de résidence, etc.) ?"
    };

    reply.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_greeting_short_messages_only() {
        assert!(is_greeting("Bonjour"));
        assert!(is_greeting("  salut Clarus "));
        assert!(!is_greeting("bonjour je voudrais renouveler mon passeport"));
        assert!(!is_greeting(""));
        assert!(!is_greeting("passeport"));
    }

    #[test]
    fn test_empty_message_asks_for_details() {
        assert_eq!(local_reply("   "), CLARIFY_REPLY);
    }

    #[test]
    fn test_greeting_reply() {
        assert!(local_reply("Salam").starts_with("Salut !"));
    }

    #[test]
    fn test_passport_rules_are_ordered() {
        assert!(local_reply("Quels documents pour le passeport ?").contains("extrait de naissance"));
        assert!(local_reply("Passeport : quel délai ?").contains("délai de délivrance"));
        assert!(local_reply("Je veux un passeport").starts_with("Pour le passeport biométrique :"));
    }

    #[test]
    fn test_identity_and_residence() {
        assert!(local_reply("Comment faire ma CNI ?").starts_with("La carte d'identité"));
        assert!(local_reply("certificat de residence").starts_with("Le certificat de résidence"));
    }

    #[test]
    fn test_thanks_and_unknown() {
        assert!(local_reply("merci beaucoup pour tout").starts_with("Avec plaisir"));
        assert!(local_reply("quelle heure est-il").starts_with("Je ne suis pas sûr"));
    }
}
