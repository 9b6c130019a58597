use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, none_of},
    combinator::{eof, map, opt, recognize, rest, value},
    multi::{many0, many1},
    sequence::{preceded, terminated},
    IResult,
};

use crate::level::Level;

#[derive(Debug, Clone, PartialEq)]
pub enum QueueCommand<'a> {
    Enqueue(&'a str, Level),
    Dequeue,
    Peek,
    Len,
    Top,
    Swap,
    Reset,
    Stats,
    Unknown(&'a str),
}

pub fn parse_command(input: &str) -> IResult<&str, QueueCommand> {
    alt((
        parse_enqueue_command,
        keyword("DEQ", QueueCommand::Dequeue),
        keyword("PEEK", QueueCommand::Peek),
        keyword("LEN", QueueCommand::Len),
        keyword("TOP", QueueCommand::Top),
        keyword("SWAP", QueueCommand::Swap),
        keyword("RESET", QueueCommand::Reset),
        keyword("STATS", QueueCommand::Stats),
        parse_unknown_command,
    ))(input)
}

// ENQ <payload> [<level>]; a level that isn't an in-range positive integer
// parses as Level::None.
fn parse_enqueue_command(input: &str) -> IResult<&str, QueueCommand> {
    let (input, _) = tag("ENQ")(input)?;
    let (input, _) = parse_separator(input)?;
    let (input, payload) = parse_token(input)?;
    let (input, level) = opt(preceded(parse_separator, map(parse_token, parse_level)))(input)?;
    let (input, _) = parse_line_end(input)?;
    Ok((input, QueueCommand::Enqueue(payload, level.unwrap_or(Level::None))))
}

fn keyword<'a>(
    word: &'static str,
    command: QueueCommand<'a>,
) -> impl FnMut(&'a str) -> IResult<&'a str, QueueCommand<'a>> {
    value(command, terminated(tag(word), parse_line_end))
}

fn parse_unknown_command(input: &str) -> IResult<&str, QueueCommand> {
    let (input, line) = rest(input)?;
    Ok((input, QueueCommand::Unknown(line.trim())))
}

fn parse_level(token: &str) -> Level {
    token.parse::<i64>().map_or(Level::None, Level::from_raw)
}

fn parse_whitespace(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((char(' '), char('\t'), char('\r'), char('\n')))))(input)
}

fn parse_separator(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((char(' '), char('\t')))))(input)
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    recognize(many1(none_of(" \t\r\n")))(input)
}

fn parse_line_end(input: &str) -> IResult<&str, &str> {
    preceded(parse_whitespace, eof)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enqueue_command_with_level() {
        let input = "ENQ job 5";
        let expected = Ok(("", QueueCommand::Enqueue("job", Level::Value(5))));
        assert_eq!(parse_command(input), expected);
    }

    #[test]
    fn test_parse_enqueue_command_without_level() {
        let input = "ENQ job";
        let expected = Ok(("", QueueCommand::Enqueue("job", Level::None)));
        assert_eq!(parse_command(input), expected);
    }

    #[test]
    fn test_parse_enqueue_command_with_invalid_level() {
        let cases = vec!["ENQ job 0", "ENQ job -2", "ENQ job 2.5", "ENQ job high", "ENQ job 99999999999"];

        for input in cases {
            let expected = Ok(("", QueueCommand::Enqueue("job", Level::None)));
            assert_eq!(parse_command(input), expected);
        }
    }

    #[test]
    fn test_parse_enqueue_command_with_trailing_newline() {
        let input = "ENQ job 3\r\n";
        let expected = Ok(("", QueueCommand::Enqueue("job", Level::Value(3))));
        assert_eq!(parse_command(input), expected);
    }

    #[test]
    fn test_parse_enqueue_command_with_extra_tokens() {
        let input = "ENQ job 3 extra";
        let expected = Ok(("", QueueCommand::Unknown("ENQ job 3 extra")));
        assert_eq!(parse_command(input), expected);
    }

    #[test]
    fn test_parse_keyword_commands() {
        let cases = vec![
            ("DEQ", QueueCommand::Dequeue),
            ("PEEK", QueueCommand::Peek),
            ("LEN", QueueCommand::Len),
            ("TOP", QueueCommand::Top),
            ("SWAP", QueueCommand::Swap),
            ("RESET\n", QueueCommand::Reset),
            ("STATS ", QueueCommand::Stats),
        ];

        for (input, command) in cases {
            assert_eq!(parse_command(input), Ok(("", command)));
        }
    }

    #[test]
    fn test_parse_keyword_needs_boundary() {
        let input = "LENGTH";
        let expected = Ok(("", QueueCommand::Unknown("LENGTH")));
        assert_eq!(parse_command(input), expected);
    }

    #[test]
    fn test_parse_unknown_command() {
        let input = "UNKNOWN thing";
        let expected = Ok(("", QueueCommand::Unknown("UNKNOWN thing")));
        assert_eq!(parse_command(input), expected);
    }
}
