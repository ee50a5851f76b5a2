use litemark::markdown_to_html;
use litemark::parser::Parser;
use std::io::{self, Read};

fn main() {
    let dump_ast = std::env::args().any(|arg| arg == "--ast");

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .expect("Failed to read stdin");

    if dump_ast {
        let document = Parser::new().parse(&input);
        let json = serde_json::to_string_pretty(&document).expect("Failed to serialize AST");
        println!("{}", json);
    } else {
        print!("{}", markdown_to_html(&input));
    }
}
