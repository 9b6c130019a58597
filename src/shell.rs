use tracing::instrument;

use crate::errors::ShellError;
use crate::parser::{parse_command, QueueCommand};
use crate::priority_queue::PriorityQueue;

const NIL: &str = "(nil)";

/// Runs text commands against a single priority queue of string payloads.
#[derive(Debug, Default)]
pub struct Shell {
    queue: PriorityQueue<String>,
}

impl Shell {
    pub fn new(queue: PriorityQueue<String>) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &PriorityQueue<String> {
        &self.queue
    }

    #[instrument(skip(self))]
    pub fn process_line(&mut self, line: &str) -> Result<String, ShellError> {
        let command = parse_command(line)
            .map(|(_, command)| command)
            .unwrap_or(QueueCommand::Unknown(line));

        self.execute(command)
    }

    pub fn execute(&mut self, command: QueueCommand) -> Result<String, ShellError> {
        match command {
            QueueCommand::Enqueue(payload, level) => {
                Ok(self.queue.enqueue(payload.to_owned(), level).to_string())
            }
            QueueCommand::Dequeue => Ok(self.queue.dequeue().unwrap_or_else(|| NIL.to_owned())),
            QueueCommand::Peek => Ok(self.queue.peek().cloned().unwrap_or_else(|| NIL.to_owned())),
            QueueCommand::Len => Ok(self.queue.len().to_string()),
            QueueCommand::Top => Ok(self.queue.top().to_string()),
            QueueCommand::Swap => {
                self.queue.swap_priority_order();
                Ok(self.queue.order().to_string())
            }
            QueueCommand::Reset => {
                self.queue.reset();
                Ok("OK".to_owned())
            }
            QueueCommand::Stats => serde_json::to_string(&self.queue.stats())
                .map_err(|err| ShellError::Serialize(err.to_string())),
            QueueCommand::Unknown(line) => Err(ShellError::UnknownCommand(line.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::PriorityOrder;

    fn run(shell: &mut Shell, lines: &[&str]) -> Vec<Result<String, ShellError>> {
        lines.iter().map(|line| shell.process_line(line)).collect()
    }

    fn ok(values: &[&str]) -> Vec<Result<String, ShellError>> {
        values.iter().map(|value| Ok(value.to_string())).collect()
    }

    #[test]
    fn test_scenario_highest_first() {
        let mut shell = Shell::default();
        let replies = run(
            &mut shell,
            &["ENQ A 5", "ENQ B 1", "ENQ C 5", "ENQ D", "TOP", "DEQ", "DEQ", "TOP", "DEQ", "DEQ", "DEQ"],
        );

        assert_eq!(replies, ok(&["1", "2", "3", "4", "5", "A", "C", "1", "B", "D", "(nil)"]));
    }

    #[test]
    fn test_fixed_levels_demote() {
        let mut shell = Shell::new(PriorityQueue::new(PriorityOrder::HighestFirst, &[1, 2, 3]));
        let replies = run(&mut shell, &["ENQ X 7", "TOP", "PEEK", "LEN"]);

        assert_eq!(replies, ok(&["1", "none", "X", "1"]));
    }

    #[test]
    fn test_swap_and_reset() {
        let mut shell = Shell::default();
        let replies = run(
            &mut shell,
            &["ENQ a 2", "ENQ b 8", "SWAP", "PEEK", "RESET", "LEN", "TOP", "ENQ Y", "PEEK"],
        );

        assert_eq!(
            replies,
            ok(&["1", "2", "lowest first", "a", "OK", "0", "none", "1", "Y"])
        );
        assert_eq!(shell.queue().order(), PriorityOrder::LowestFirst);
    }

    #[test]
    fn test_stats_as_json() {
        let mut shell = Shell::default();
        run(&mut shell, &["ENQ a 3", "ENQ b 3", "ENQ c"]);

        let reply = shell.process_line("STATS").unwrap();
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();

        assert_eq!(json["len"], 3);
        assert_eq!(json["order"], "highest first");
        assert_eq!(json["top"]["value"], 3);
        assert_eq!(json["unprioritized"], 1);
        assert_eq!(json["levels"][0]["len"], 2);
    }

    #[test]
    fn test_unknown_command() {
        let mut shell = Shell::default();

        assert_eq!(
            shell.process_line("FLY away"),
            Err(ShellError::UnknownCommand("FLY away".to_owned()))
        );
        assert_eq!(shell.queue().len(), 0);
    }
}
