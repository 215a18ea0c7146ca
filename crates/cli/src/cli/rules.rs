use litlint::Linter;

use crate::context::Context;
use crate::registry::{CommandSpec, Registry};

const COMMAND: CommandSpec = CommandSpec {
    name: "rules",
    category: "lint",
    summary: "list registered rules",
    aliases: &[],
    handler: cmd,
};

pub fn register(registry: &mut Registry) {
    registry.add_command(COMMAND);
}

pub fn cmd(context: &Context) {
    let linter = Linter::new(context.settings.clone());
    stdio::header("registered rules");
    for rule in linter.rules() {
        let meta = rule.meta();
        stdio::info(
            meta.name,
            &format!("[{}] {}", meta.default_severity, meta.description),
        );
    }
    stdio::blank();
}
