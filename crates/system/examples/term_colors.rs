//! Show the full ANSI attribute vocabulary, plus truecolor output.
//!
//! Pipe this through `cat` or into a file to see the escape sequences
//! disappear: the console decision is made once, at startup.
//!
//! Run with: `cargo run --example term_colors`

use lumen_system::terminal::Term;

fn main() {
    let term = Term::stdout();
    println!("console: {}\n", term.is_console());

    for attr in ["default", "bold", "underscore", "blink", "reverse", "concealed"] {
        println!("{}", term.ansi_with(attr, attr));
    }
    println!();

    for color in ["black", "red", "green", "yellow", "blue", "magenta", "cyan", "white"] {
        let bg = format!("{color}_bg");
        print!("{} ", term.ansi_with(color, color));
        println!("{}", term.ansi_with(&bg, &bg));
    }
    println!();

    // Truecolor gradient
    for step in 0..16u16 {
        let r = (step * 16) as u8;
        print!("{}{}", term.ansi_fgcolor(r, 255 - r, 128), "#");
    }
    println!("{}", term.ansi("default"));
}
