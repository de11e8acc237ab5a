//! Prompt construction for the assistant.
//!
//! The prompt is a single user turn assembled from fixed instructions, the
//! conversation mode, a greeting rule, the recent history of the session and
//! a style hint inferred from it, followed by the question itself.

use clarus_types::chat::{HistoryEntry, MessageRole};
use clarus_types::llm::ChatMode;

use crate::chat::fallback::{contains_any, is_greeting};

/// System message sent with every completion.
pub const SYSTEM_PROMPT: &str = "Tu es Clarus, un assistant virtuel francophone spécialisé \
    dans les démarches administratives au Sénégal et les questions utiles du quotidien.";

/// History lines quoted verbatim in the prompt.
pub const RECENT_TURNS: usize = 5;

/// History lines scanned for a style hint.
pub const STYLE_WINDOW: usize = 10;

const BASE_INSTRUCTIONS: &str = "Tu es Clarus, un assistant virtuel francophone.\n\
    Ta priorité principale est d'aider pour les démarches administratives au Sénégal \
    (passeport, carte d'identité, certificats, etc.).\n\
    Tu peux aussi répondre à des questions plus générales (culture, études, informatique, \
    mathématiques, actualité factuelle, vie quotidienne), tant que cela reste légal, \
    utile et dans un cadre éthique.\n\
    Tu dois refuser poliment toute demande illégale, dangereuse ou contraire à l'éthique \
    (fraude, violence, haine, harcèlement, contenu sexuel explicite, désinformation, \
    collecte de données personnelles sensibles, etc.), \
    et expliquer brièvement pourquoi tu refuses.\n\
    Si tu n'es pas sûr d'une information, dis-le clairement au lieu d'inventer, \
    et propose éventuellement une piste générale.\n";

fn mode_instructions(mode: ChatMode) -> &'static str {
    match mode {
        ChatMode::Prof => {
            "Tu as un ton pédagogique, bienveillant et clair. \
             Explique les démarches ou les réponses étape par étape, avec des phrases courtes.\n"
        }
        ChatMode::Exam => {
            "Tu te comportes comme un examinateur. \
             Pose des questions, propose des QCM ou des cas pratiques, \
             et corrige les réponses de l'utilisateur. \
             Tes réponses doivent être concises et orientées exercice.\n"
        }
        ChatMode::Neutral => "Réponds de façon claire, courte et bienveillante.\n",
    }
}

/// One history entry as quoted in the prompt.
pub fn history_line(entry: &HistoryEntry) -> String {
    match entry.role {
        MessageRole::User => format!("Utilisateur : {}", entry.content),
        MessageRole::Assistant => format!("Clarus : {}", entry.content),
    }
}

/// Extra guidance inferred from the last [`STYLE_WINDOW`] history lines.
///
/// Returns `None` when nothing in the conversation suggests a style.
pub fn infer_style_hint(history: &[HistoryEntry]) -> Option<&'static str> {
    if history.is_empty() {
        return None;
    }

    let start = history.len().saturating_sub(STYLE_WINDOW);
    let text = history[start..]
        .iter()
        .map(history_line)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if contains_any(&text, &["examen", "qcm", "question à choix", "test"]) {
        Some(
            "L'utilisateur semble réviser ou s'entraîner. \
             Tu peux proposer parfois des exemples de questions ou de mini-exercices.\n",
        )
    } else if contains_any(&text, &["code", "python", "flutter", "javascript", "programmation"]) {
        Some(
            "L'utilisateur est développeur. \
             Tu peux utiliser un vocabulaire un peu plus technique et des exemples orientés développeur.\n",
        )
    } else if contains_any(&text, &["je ne comprends pas", "explique simplement", "simplement"]) {
        Some(
            "L'utilisateur a besoin d'explications simples. \
             Utilise des phrases très courtes et des exemples concrets.\n",
        )
    } else {
        None
    }
}

/// Build the user prompt for `question` in a session with `history`.
///
/// `question` is expected to be trimmed and non-empty.
pub fn build_prompt(question: &str, mode: ChatMode, history: &[HistoryEntry]) -> String {
    let mut prompt = String::from(BASE_INSTRUCTIONS);
    prompt.push_str(mode_instructions(mode));

    if is_greeting(question) && history.is_empty() {
        prompt.push_str(
            "L'utilisateur vient de te saluer au début de la conversation. \
             Commence ta réponse par une salutation du même niveau de familiarité.\n",
        );
    } else {
        prompt.push_str(
            "Ne commence pas systématiquement par une salutation. \
             Va directement à l'information utile, sauf si une formule de politesse est vraiment nécessaire.\n",
        );
    }

    if !history.is_empty() {
        prompt.push_str(
            "\nHistorique récent de la conversation. \
             Garde la cohérence avec ce contexte et évite de répéter les mêmes explications :\n",
        );
        let start = history.len().saturating_sub(RECENT_TURNS);
        for entry in &history[start..] {
            prompt.push_str(&history_line(entry));
            prompt.push('\n');
        }
    }

    if let Some(hint) = infer_style_hint(history) {
        prompt.push_str(hint);
    }

    prompt.push_str(
        "Si la question est simple ou courte, réponds simplement. \
         Si la question est complexe, structure ta réponse en étapes ou en points clairs.\n",
    );
    prompt.push_str(&format!("\nQuestion de l'utilisateur : {question}\n"));

    prompt
}
