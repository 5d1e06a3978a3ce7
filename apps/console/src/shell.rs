//! Interactive session: the management list is shown on start, then commands
//! are read line by line until `quit` or end of input.

use client_core::{flows::FlowOutcome, forms::FormData};
use shared::domain::{DonorId, BLOOD_TYPES};

use crate::page::Page;

const HELP: &str = "\
commands:
  list              show donors with delete controls
  public            show the read-only donor list
  register          fill in and submit the donor registration form
  donate            fill in and submit the donation form
  delete <id>       delete a donor shown in the list
  show <id>         show one donor's full record
  eligibility <id>  check whether a donor may donate
  help              show this help
  quit              leave
form fields: press enter to keep the value in [brackets], '-' to clear it";

struct Field {
    name: &'static str,
    label: &'static str,
}

const REGISTRATION_FIELDS: [Field; 7] = [
    Field { name: "name", label: "Name" },
    Field { name: "age", label: "Age" },
    Field { name: "email", label: "Email" },
    Field { name: "phone", label: "Phone" },
    Field { name: "blood_type", label: "Blood type" },
    Field { name: "address", label: "Address (optional)" },
    Field { name: "emergency_contact", label: "Emergency contact (optional)" },
];

const DONATION_FIELDS: [Field; 6] = [
    Field { name: "donor_id", label: "Donor id" },
    Field { name: "donation_date", label: "Donation date (YYYY-MM-DD)" },
    Field { name: "quantity_ml", label: "Quantity (ml)" },
    Field { name: "hemoglobin", label: "Hemoglobin (g/dL)" },
    Field { name: "blood_pressure", label: "Blood pressure" },
    Field { name: "notes", label: "Notes (optional)" },
];

pub async fn run(page: &Page) {
    let mut registration_form = FormData::new();
    let mut donation_form = FormData::new();

    page.show_management().await;
    println!("type 'help' for commands");

    while let Some(line) = page.operator().read_line("> ").await {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "list" => page.show_management().await,
            "public" => page.show_public().await,
            "register" => {
                println!("blood types: {}", BLOOD_TYPES.join(", "));
                if !fill_form(page, &mut registration_form, &REGISTRATION_FIELDS).await {
                    break;
                }
                if page.register(&registration_form).await == FlowOutcome::Succeeded {
                    registration_form.reset();
                }
            }
            "donate" => {
                if !fill_form(page, &mut donation_form, &DONATION_FIELDS).await {
                    break;
                }
                page.record_donation(&mut donation_form).await;
            }
            "delete" => match parse_id(argument) {
                Some(donor_id) => {
                    if page.delete_rendered(donor_id).await.is_none() {
                        println!("No donor card with id {donor_id} is shown; run 'list' first.");
                    }
                }
                None => println!("usage: delete <id>"),
            },
            "show" => match parse_id(argument) {
                Some(donor_id) => {
                    page.show_donor(donor_id).await;
                }
                None => println!("usage: show <id>"),
            },
            "eligibility" => match parse_id(argument) {
                Some(donor_id) => {
                    page.check_eligibility(donor_id).await;
                }
                None => println!("usage: eligibility <id>"),
            },
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("unknown command '{other}'; type 'help'"),
        }
    }
}

fn parse_id(argument: Option<&str>) -> Option<DonorId> {
    argument?.parse().ok()
}

const CLEAR_FIELD: &str = "-";

/// Prompts for every field, offering the current value as the default so a
/// rejected form can be corrected instead of retyped. Returns `false` when
/// input ends.
async fn fill_form(page: &Page, form: &mut FormData, fields: &[Field]) -> bool {
    for field in fields {
        let current = form.get(field.name).unwrap_or_default().to_string();
        let prompt = if current.is_empty() {
            format!("{}: ", field.label)
        } else {
            format!("{} [{current}]: ", field.label)
        };
        let Some(entered) = page.operator().read_line(&prompt).await else {
            return false;
        };
        form.insert(field.name, resolve_entry(current, entered));
    }
    true
}

/// An empty entry keeps the current value; `-` blanks the field.
fn resolve_entry(current: String, entered: String) -> String {
    match entered.as_str() {
        "" => current,
        CLEAR_FIELD => String::new(),
        _ => entered,
    }
}
