use crate::app::models::Action;

pub struct OutputGenerator;

impl OutputGenerator {
    /// One `<kind><padding><path>` line per action.
    pub fn generate_report(actions: &[Action]) -> String {
        let mut output = String::new();

        for action in actions {
            output.push_str(&format!("{:6}  {}\n", action.kind, action.path.display()));
        }

        output.trim_end().to_string()
    }
}
