//! Prompt construction for the summary model.

use crate::complaint::Complaint;

/// Escapes chat-template control sequences so customer text cannot pose
/// as instructions.
fn sanitize_for_prompt(text: &str) -> String {
    text.replace("<|", "< |")
        .replace("|>", "| >")
        .replace("[INST]", "[ INST ]")
        .replace("[/INST]", "[ / INST ]")
        .replace("<<SYS>>", "< < SYS > >")
        .replace("<</SYS>>", "< < / SYS > >")
}

/// Builds the instruction sent to the model for one complaint.
pub fn build_prompt(complaint: &Complaint) -> String {
    format!(
        r#"You are a helpful assistant for the Provincial Electricity Authority (PEA) of Thailand.
Analyze the following customer complaint and provide a concise summary and a recommended course of action for the PEA staff.
Format the output in Markdown.

**Complaint Details:**
- **CA Number:** {ca_number}
- **Category:** {category}
- **Customer Name:** {full_name}
- **Location:** {location}
- **Description:** {description}

**Your Task:**
1. **Summary:** Briefly summarize the core issue in one or two sentences.
2. **Priority Level:** Assign a priority level (Low, Medium, High, Critical) based on the nature of the complaint.
3. **Recommended Actions:** Provide a clear, step-by-step list of actions for the PEA team to resolve this issue.
"#,
        ca_number = sanitize_for_prompt(&complaint.ca_number),
        category = complaint.category.label(),
        full_name = sanitize_for_prompt(&complaint.full_name),
        location = sanitize_for_prompt(&complaint.location),
        description = sanitize_for_prompt(&complaint.description),
    )
}
