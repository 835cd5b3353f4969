//! Conversation flow for collecting preferences one question at a time.
//!
//! The session is an explicit state machine: either asking question `i` or
//! done. Resetting returns a finished session to the first question with
//! cleared preferences. There is no other state.

use crate::models::{MixPreference, MovieRecord, PreferenceSet};
use crate::services::mix;

/// Answers treated as "no preference"
const SKIP_WORDS: [&str; 6] = [
    "skip",
    "idk",
    "i don't know",
    "dont know",
    "random",
    "surprise me",
];

/// Texts that restart a finished conversation
const RESET_WORDS: [&str; 3] = ["reset", "start over", "restart"];

const GREETING: &str = "Hi! I'll ask a few quick questions and then recommend movies.";

const DONE_HINT: &str =
    "Type reset to start over, or share more preferences (actor/genre) and I'll tune it.";

/// Which preference a question fills in
#[derive(Debug, Clone, Copy)]
enum PrefField {
    FavMovie,
    FavActor,
    FavSong,
    Genre,
    Mix,
}

struct Question {
    field: PrefField,
    prompt: &'static str,
}

const QUESTIONS: [Question; 5] = [
    Question {
        field: PrefField::FavMovie,
        prompt: "Tell me one movie you love (or type skip).",
    },
    Question {
        field: PrefField::FavActor,
        prompt: "Who's your favorite hero/actor? (or skip)",
    },
    Question {
        field: PrefField::FavSong,
        prompt: "Any favorite movie song? (or skip)",
    },
    Question {
        field: PrefField::Genre,
        prompt: "Pick a genre (Action / Comedy / Romance / Thriller / Sci-Fi / Horror / Drama) or type anything (or skip).",
    },
    Question {
        field: PrefField::Mix,
        prompt: "Do you want more Indian, more global, or 50-50? (default: 50-50)",
    },
];

/// Conversation state: mid-questionnaire or finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Asking(usize),
    Done,
}

/// One user's conversation, accumulated preferences included
#[derive(Debug, Clone)]
pub struct ChatSession {
    state: ChatState,
    prefs: PreferenceSet,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What the controller should do after feeding in one user message
#[derive(Debug, Clone, PartialEq)]
pub enum ChatTurn {
    /// Send this prompt and wait for the next answer
    Ask(String),
    /// All questions answered; run the recommender with these preferences
    Ready(PreferenceSet),
    /// Conversation already finished; nudge toward reset
    Hint(String),
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            state: ChatState::Asking(0),
            prefs: PreferenceSet::default(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// The greeting plus the first question
    pub fn opening(&self) -> String {
        format!("{} {}", GREETING, QUESTIONS[0].prompt)
    }

    /// Feeds one user message into the state machine
    pub fn advance(&mut self, message: &str) -> ChatTurn {
        match self.state {
            ChatState::Done => {
                if RESET_WORDS.contains(&message.trim().to_lowercase().as_str()) {
                    *self = Self::new();
                    ChatTurn::Ask(format!("Cool, starting over. {}", QUESTIONS[0].prompt))
                } else {
                    ChatTurn::Hint(DONE_HINT.to_string())
                }
            }
            ChatState::Asking(index) => {
                let answer = normalize_answer(message);
                self.record(QUESTIONS[index].field, &answer);

                if index + 1 < QUESTIONS.len() {
                    self.state = ChatState::Asking(index + 1);
                    ChatTurn::Ask(QUESTIONS[index + 1].prompt.to_string())
                } else {
                    self.state = ChatState::Done;
                    ChatTurn::Ready(self.prefs.clone())
                }
            }
        }
    }

    fn record(&mut self, field: PrefField, answer: &str) {
        match field {
            PrefField::FavMovie => self.prefs.fav_movie = answer.to_string(),
            PrefField::FavActor => self.prefs.fav_actor = answer.to_string(),
            PrefField::FavSong => self.prefs.fav_song = answer.to_string(),
            PrefField::Genre => self.prefs.genre = answer.to_string(),
            PrefField::Mix => {
                self.prefs.mix = if answer.is_empty() {
                    MixPreference::Balanced
                } else {
                    mix::classify_mix(answer)
                };
            }
        }
    }
}

/// Maps trivial non-answers ("skip", "idk", ...) to "no preference"
pub fn normalize_answer(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || SKIP_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Renders the final recommendation message, one line per pick
pub fn render_recommendations(movies: &[MovieRecord]) -> String {
    if movies.is_empty() {
        return "I couldn't find anything matching that. Type reset to try different answers."
            .to_string();
    }

    let mut lines = vec!["Here are your recommendations (last 20 years):".to_string()];
    for movie in movies {
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "year unknown".to_string());
        lines.push(format!(
            "- {} ({}) [{}] rating {:.1}",
            movie.title,
            year,
            movie.origin(),
            movie.vote_average
        ));
    }
    lines.push(String::new());
    lines.push("If you want a new list, type reset.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(session: &mut ChatSession, answers: [&str; 5]) -> ChatTurn {
        let mut last = ChatTurn::Hint(String::new());
        for answer in answers {
            last = session.advance(answer);
        }
        last
    }

    #[test]
    fn test_walks_through_all_questions() {
        let mut session = ChatSession::new();
        assert_eq!(session.state(), ChatState::Asking(0));

        let turn = session.advance("3 Idiots");
        assert!(matches!(turn, ChatTurn::Ask(_)));
        assert_eq!(session.state(), ChatState::Asking(1));
    }

    #[test]
    fn test_final_answer_yields_ready_with_collected_prefs() {
        let mut session = ChatSession::new();
        let turn = answer_all(
            &mut session,
            ["3 Idiots", "Aamir Khan", "skip", "Comedy", "more indian"],
        );

        let ChatTurn::Ready(prefs) = turn else {
            panic!("expected Ready, got {:?}", turn);
        };
        assert_eq!(prefs.fav_movie, "3 Idiots");
        assert_eq!(prefs.fav_actor, "Aamir Khan");
        assert_eq!(prefs.fav_song, "");
        assert_eq!(prefs.genre, "Comedy");
        assert_eq!(prefs.mix, MixPreference::MoreIndian);
        assert_eq!(session.state(), ChatState::Done);
    }

    #[test]
    fn test_skip_words_normalize_to_no_preference() {
        assert_eq!(normalize_answer("skip"), "");
        assert_eq!(normalize_answer("  IDK  "), "");
        assert_eq!(normalize_answer("Surprise Me"), "");
        assert_eq!(normalize_answer(""), "");
        assert_eq!(normalize_answer("  Rajinikanth "), "Rajinikanth");
    }

    #[test]
    fn test_skipped_mix_defaults_to_balanced() {
        let mut session = ChatSession::new();
        let turn = answer_all(&mut session, ["skip", "skip", "skip", "skip", "skip"]);

        let ChatTurn::Ready(prefs) = turn else {
            panic!("expected Ready");
        };
        assert_eq!(prefs, PreferenceSet::default());
    }

    #[test]
    fn test_done_session_hints_until_reset() {
        let mut session = ChatSession::new();
        answer_all(&mut session, ["skip", "skip", "skip", "skip", "skip"]);

        assert!(matches!(session.advance("hello?"), ChatTurn::Hint(_)));
        assert_eq!(session.state(), ChatState::Done);

        let turn = session.advance("reset");
        assert!(matches!(turn, ChatTurn::Ask(_)));
        assert_eq!(session.state(), ChatState::Asking(0));
    }

    #[test]
    fn test_reset_clears_preferences() {
        let mut session = ChatSession::new();
        answer_all(
            &mut session,
            ["3 Idiots", "Aamir Khan", "skip", "Comedy", "more indian"],
        );
        session.advance("start over");

        let turn = answer_all(&mut session, ["skip", "skip", "skip", "skip", "skip"]);
        let ChatTurn::Ready(prefs) = turn else {
            panic!("expected Ready");
        };
        assert_eq!(prefs, PreferenceSet::default());
    }

    #[test]
    fn test_render_lists_title_year_origin_and_rating() {
        let movies = vec![MovieRecord {
            id: Some(1),
            title: "RRR".to_string(),
            original_language: "te".to_string(),
            release_date: "2022-03-24".to_string(),
            vote_average: 7.8,
            overview: None,
        }];

        let rendered = render_recommendations(&movies);
        assert!(rendered.contains("RRR (2022) [Indian] rating 7.8"));
        assert!(rendered.contains("type reset"));
    }

    #[test]
    fn test_render_empty_list_is_a_normal_outcome() {
        let rendered = render_recommendations(&[]);
        assert!(rendered.contains("couldn't find anything"));
    }
}
