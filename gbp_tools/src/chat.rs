use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use gbp_engine::chat::respond;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

pub fn chat(message: Option<String>) {
    match message {
        Some(message) => println!("{}", respond(&message)),
        None => {
            if let Err(e) = chat_loop() {
                println!("Chat ended. {e}");
            }
        },
    }
}

fn chat_loop() -> Result<()> {
    println!("Ask the Global Business Pay support desk anything. Type 'exit' to leave.");
    let theme = ColorfulTheme::default();
    loop {
        let message: String = Input::with_theme(&theme).with_prompt("You").allow_empty(true).interact_text()?;
        let message = message.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            println!("Goodbye!");
            return Ok(());
        }
        println!("Support: {}\n", respond(message));
    }
}
