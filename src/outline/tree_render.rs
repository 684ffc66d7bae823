//! ASCII tree rendering for parsed outlines.

use crate::models::{OutlineAction, ProjectTemplate};

const WEB_API: char = '●';
const CLASS_LIBRARY: char = '○';

fn template_symbol(template: ProjectTemplate) -> char {
    match template {
        ProjectTemplate::WebApi => WEB_API,
        ProjectTemplate::ClassLibrary => CLASS_LIBRARY,
    }
}

/// Render parsed outline actions as an ASCII tree.
///
/// Sections are roots; each leaf is marked with the template it will be scaffolded from.
///
/// Example output:
/// ```text
/// App.Services
/// ├── ● App.Services.Users.API
/// └── ○ App.Services.Orders
/// ```
pub fn render_plan(actions: &[OutlineAction], api_suffix: &str) -> String {
    let mut sections: Vec<(&str, Vec<&str>)> = Vec::new();
    for action in actions {
        match action {
            OutlineAction::CreateSection(section) => {
                sections.push((section.folder.as_str(), Vec::new()));
            }
            OutlineAction::EmitLeaf(leaf) => {
                if let Some((_, leaves)) = sections.last_mut() {
                    leaves.push(leaf.name.as_str());
                }
            }
        }
    }

    let mut output = String::new();
    for (folder, leaves) in sections {
        output.push_str(folder);
        output.push('\n');

        for (i, leaf) in leaves.iter().enumerate() {
            let branch = if i == leaves.len() - 1 { "└── " } else { "├── " };
            output.push_str(branch);
            output.push(template_symbol(ProjectTemplate::for_project(leaf, api_suffix)));
            output.push(' ');
            output.push_str(leaf);
            output.push('\n');
        }
    }
    output
}
