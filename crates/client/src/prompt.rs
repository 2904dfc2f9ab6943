use std::io::{self, BufRead, Write};

/// User-facing notifications and yes/no questions.
pub trait Prompter {
    fn notify(&mut self, message: &str);
    fn confirm(&mut self, question: &str) -> bool;
}

/// Prompts on stdout, answers read line by line from stdin.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn notify(&mut self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&mut self, question: &str) -> bool {
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Scripted prompter for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::VecDeque;

    /// Answers questions from a queue (then `false`) and records everything shown.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<bool>,
        pub notifications: Vec<String>,
        pub questions: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
            Self { answers: answers.into_iter().collect(), ..Self::default() }
        }

        pub fn last_notification(&self) -> Option<&str> {
            self.notifications.last().map(String::as_str)
        }
    }

    impl Prompter for ScriptedPrompter {
        fn notify(&mut self, message: &str) {
            self.notifications.push(message.to_string());
        }

        fn confirm(&mut self, question: &str) -> bool {
            self.questions.push(question.to_string());
            self.answers.pop_front().unwrap_or(false)
        }
    }
}
