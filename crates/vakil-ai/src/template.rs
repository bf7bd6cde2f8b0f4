//! Instruction templates for the generation engine.
//!
//! Template selection and interpolation are kept apart from the transport
//! call: [`build_prompt`] is deterministic, so "what would be sent" is
//! testable without any network, and every category-conditional rule
//! lives here rather than being scattered across the wizard.

use vakil_core::{CategoryFields, DraftRequest, Language, PetitionCategory};

/// Drafting rules and document skeleton common to every category.
const BASE_RULES: &str = r#"You are an elite legal counsel and drafting expert practicing in the Indian Judicial System. Generate a highly professional, court-ready legal draft from the case details below.

RULES:
1. NO CONVERSATION OR FILLER: output only the legal draft, with no greetings or explanations.
2. NO BRANDING: no watermarks, app names, or AI branding.
3. LANGUAGE & TONE: draft entirely in the requested language using formal Indian legal terminology. Convert the raw problem narrative into objective, chronological, legal facts.
4. FORMATTING: use Markdown. Centre-align titles with ## headers and use ** for emphasis.

STRUCTURE (every draft):
1. COURT HEADING: **IN THE COURT OF [territorial jurisdiction]**
2. CAUSE TITLE: [Petitioner Name] vs [Respondent Name]
3. TITLE OF PETITION: e.g. **APPLICATION UNDER [Relevant Section] FOR [Relief]**
4. OPENING: **MOST RESPECTFULLY SHOWETH:**
5. PRAYER: must begin with the heading **PRAYER** and conclude with: "AND FOR THIS ACT OF KINDNESS, THE PETITIONER SHALL AS IN DUTY BOUND EVER PRAY."
6. SIGNATURE & VERIFICATION: standard Indian verification clause at the bottom.

Leave blank lines (____) for missing specific details so they can be filled in later; never omit a section because a detail is absent."#;

/// Category-specific additions to the document skeleton.
///
/// Writ and Consumer petitions, like the base skeleton, carry no extra
/// rules beyond what the category block below states; an empty string
/// means the base structure alone applies.
fn structure_rules(category: PetitionCategory) -> &'static str {
    match category {
        PetitionCategory::Civil => {
            "CIVIL SUIT STRUCTURE: include numbered paragraphs specifically titled \
             **Cause of Action**, **Jurisdiction**, and **Valuation & Court Fee** \
             (valued from the pecuniary jurisdiction)."
        }
        PetitionCategory::Criminal => {
            "CRIMINAL STRUCTURE: prominently feature the FIR Number, Police Station, \
             and Sections (BNS/BNSS or IPC/CrPC) at the top. Focus paragraphs on \
             liberty, presumption of innocence, and the exact timeline of the offence."
        }
        PetitionCategory::Writ => {
            "WRIT STRUCTURE: include a **SYNOPSIS & LIST OF DATES** before the court \
             heading, and divide the body into **FACTS** and **GROUNDS**."
        }
        PetitionCategory::Family => {
            "FAMILY/MATRIMONIAL STRUCTURE: include the exact dates of marriage and \
             separation and the statutory grounds for the relief sought."
        }
        PetitionCategory::Consumer => "",
    }
}

/// Category-specific context lines interpolated into the instructions.
///
/// Blank entries are skipped; the engine renders placeholders for them
/// per the base rules.
fn case_context(request: &DraftRequest) -> String {
    let mut lines = Vec::new();
    match &request.category_fields {
        CategoryFields::Criminal {
            fir_number,
            police_station,
            custody_status,
        } => {
            if !fir_number.trim().is_empty() {
                lines.push(format!("FIR Number: {fir_number}"));
            }
            if !police_station.trim().is_empty() {
                lines.push(format!("Police Station: {police_station}"));
            }
            lines.push(format!("Custody Status: {}", custody_status.describe()));
        }
        CategoryFields::Civil {
            date_of_cause_of_action,
        } => {
            if !date_of_cause_of_action.trim().is_empty() {
                lines.push(format!("Date of Cause of Action: {date_of_cause_of_action}"));
            }
        }
        CategoryFields::Family { date_of_marriage } => {
            if !date_of_marriage.trim().is_empty() {
                lines.push(format!("Date of Marriage: {date_of_marriage}"));
            }
        }
        CategoryFields::Empty {} => {}
    }
    lines.join("\n")
}

/// Render the complete one-shot instruction payload for a finalized
/// request: base rules, the category's structure rules, the language
/// directive, interpolated category context, and the request as JSON.
///
/// Deterministic for a given request and language. Serialisation of a
/// wizard-frozen request cannot fail; an error here is defect-class.
pub fn build_prompt(request: &DraftRequest, language: Language) -> serde_json::Result<String> {
    let details = serde_json::to_string_pretty(request)?;

    let mut prompt = String::from(BASE_RULES);
    let extra = structure_rules(request.petition_type);
    if !extra.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(extra);
    }
    prompt.push_str("\n\nTHE ENTIRE PETITION MUST BE WRITTEN IN ");
    prompt.push_str(language.instruction_name());
    prompt.push_str(".\n");

    let context = case_context(request);
    if !context.is_empty() {
        prompt.push('\n');
        prompt.push_str(&context);
        prompt.push('\n');
    }

    prompt.push_str("\nCase Details (JSON):\n");
    prompt.push_str(&details);
    Ok(prompt)
}
