//! Game text shown to the player

pub const INTRO: &str = "Hi, let's play the animal game. You can quit at any time by typing \"Quit.\"\n\nThink of an animal.";

pub const WIN: &str = "I win! Think of another animal.";

pub const ASK_ANIMAL: &str = "What animal were you thinking of? ";

pub const LEARNED: &str = "Thanks, I'll remember that. Think of another animal.";

pub const GOODBYE: &str = "Ok. Bye!";

/// Guess at an animal.
pub fn guess(animal: &str) -> String {
    format!("Is your animal a {}? ", animal)
}

/// Ask a stored question.
pub fn question(text: &str) -> String {
    format!("{} ", text)
}

/// Ask for a question that tells the new animal from the wrong guess.
pub fn discriminator(new_animal: &str, old_animal: &str) -> String {
    format!(
        "What is a yes/no question to tell a {} from a {}? ",
        new_animal, old_animal
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        assert_eq!(guess("cat"), "Is your animal a cat? ");
        assert_eq!(
            discriminator("dog", "cat"),
            "What is a yes/no question to tell a dog from a cat? "
        );
        assert_eq!(question("Does it bark?"), "Does it bark? ");
    }

    #[test]
    fn test_intro_greets_then_asks_for_an_animal() {
        let (greeting, rest) = INTRO.split_once("\n\n").unwrap();
        assert!(greeting.ends_with("You can quit at any time by typing \"Quit.\""));
        assert_eq!(rest, "Think of an animal.");
    }
}
