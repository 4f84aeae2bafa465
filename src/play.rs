use letterboxed::{Board, Game, PrefixTree};
use read_input::{shortcut::input, InputBuild};

pub fn play(dictionary: &PrefixTree, board: Board) {
    let mut game = Game::new(dictionary, board);
    println!("Use every letter on the board. Enter !undo to take back a word or !quit to give up.");

    while !game.is_won() {
        println!("\n{}", game.board());

        let prompt = match game.next_start() {
            Some(letter) => format!("Word (starts with {letter}): "),
            None => String::from("Word: "),
        };
        let entry: String = input().msg(&prompt).get();

        match entry.trim() {
            "!quit" => return,
            "!undo" => match game.undo() {
                Some(word) => println!("Took back {word}."),
                None => println!("Nothing to take back."),
            },
            word => match game.try_word(word) {
                Ok(()) => println!("Your words: {}", game.played().join(" - ")),
                Err(rejection) => println!("{rejection}"),
            },
        }
    }

    println!(
        "You win in {} words: {}",
        game.played().len(),
        game.played().join(" - ")
    );
}
