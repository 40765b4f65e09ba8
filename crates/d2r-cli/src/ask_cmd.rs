//! `d2r ask` command: query the canned-response assistant.

use d2r_core::assistant;

/// Run the ask command. Purely local, no database.
pub fn run_ask(question: &str) {
    let reply = assistant::reply(question);

    println!("{}", reply.message);
    println!();
    println!("Confidence: {}", reply.confidence);
    if !reply.related_questions.is_empty() {
        println!("Related questions:");
        for q in &reply.related_questions {
            println!("  - {q}");
        }
    }
}
