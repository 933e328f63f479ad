use mil::lexer::Lexer;
use mil::token::TokenKind;

#[test]
fn lexer_totality_reaches_eof_for_arbitrary_valid_programs() {
    let input = "let fibonacci = fn(x) { if (x < 2) { x } else { fibonacci(x - 1) + fibonacci(x - 2) } };";
    let mut lexer = Lexer::new(input);
    let mut count = 0;
    loop {
        let tok = lexer.next_token();
        count += 1;
        if tok.kind == TokenKind::Eof {
            break;
        }
        assert!(count < 10_000, "lexer failed to reach EOF");
    }
}

#[test]
fn concatenated_literals_reconstruct_whitespace_insensitive_source() {
    let input = "let x=5+10;";
    let mut lexer = Lexer::new(input);
    let mut rebuilt = String::new();
    loop {
        let tok = lexer.next_token();
        if tok.kind == TokenKind::Eof {
            break;
        }
        rebuilt.push_str(&tok.literal);
    }
    assert_eq!(rebuilt, "letx=5+10;");
}
