//! Every resource page of the dashboard, as configuration.

use std::sync::LazyLock;

use ustr::Ustr;

use crate::schema::{
    ACTIONS_COLUMN, Column, EndpointDescriptor, FieldKind, FormField, ResourceSchema,
};

static CATALOG: LazyLock<Vec<ResourceSchema>> = LazyLock::new(build);

/// All resources, in sidebar order.
pub fn all() -> &'static [ResourceSchema] {
    &CATALOG
}

pub fn find(name: &str) -> Option<&'static ResourceSchema> {
    CATALOG.iter().find(|schema| schema.name.as_str() == name)
}

fn options(values: &[&str]) -> FieldKind {
    FieldKind::Select(values.iter().map(|value| Ustr::from(value)).collect())
}

fn columns(pairs: &[(&str, &str)], actions: bool) -> Vec<Column> {
    let mut columns: Vec<Column> = pairs
        .iter()
        .map(|(key, label)| Column::new(key, label))
        .collect();
    if actions {
        columns.push(Column::new(ACTIONS_COLUMN, "Actions"));
    }
    columns
}

fn writable(
    name: &str,
    title: &str,
    endpoint: EndpointDescriptor,
    cols: &[(&str, &str)],
    form: Vec<FormField>,
) -> ResourceSchema {
    ResourceSchema {
        name: Ustr::from(name),
        title: Ustr::from(title),
        endpoint,
        columns: columns(cols, true),
        form,
        read_only: false,
    }
}

fn read_only(
    name: &str,
    title: &str,
    endpoint: EndpointDescriptor,
    cols: &[(&str, &str)],
) -> ResourceSchema {
    ResourceSchema {
        name: Ustr::from(name),
        title: Ustr::from(title),
        endpoint,
        columns: columns(cols, false),
        form: Vec::new(),
        read_only: true,
    }
}

#[expect(clippy::too_many_lines)]
fn build() -> Vec<ResourceSchema> {
    use FieldKind::{Checkbox, Date, Email, File, Number, Text, Textarea};

    vec![
        writable(
            "contacts",
            "Contacts",
            EndpointDescriptor::keyed("/contacts", "contacts", "contact"),
            &[
                ("name", "Name"),
                ("email", "Email"),
                ("phone", "Phone"),
                ("company", "Company"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("name", "Name", Text).required(),
                FormField::new("email", "Email", Email).required(),
                FormField::new("phone", "Phone", Text),
                FormField::new("company", "Company", Text),
                FormField::new("status", "Status", options(&["lead", "active", "inactive"])),
            ],
        ),
        writable(
            "contracts",
            "Contracts",
            EndpointDescriptor::keyed("/contracts", "contracts", "contract"),
            &[
                ("title", "Title"),
                ("client.name", "Client"),
                ("value", "Value"),
                ("start_date", "Start"),
                ("end_date", "End"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("title", "Title", Text).required(),
                FormField::new("value", "Value", Number).required(),
                FormField::new("start_date", "Start date", Date).required(),
                FormField::new("end_date", "End date", Date),
                FormField::new("status", "Status", options(&["draft", "active", "expired"])),
                FormField::new("description", "Description", Textarea),
            ],
        ),
        writable(
            "estimates",
            "Estimates",
            EndpointDescriptor::keyed("/estimates", "estimates", "estimate"),
            &[
                ("estimate_number", "Number"),
                ("client.name", "Client"),
                ("amount", "Amount"),
                ("valid_until", "Valid until"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("estimate_number", "Number", Text).required(),
                FormField::new("amount", "Amount", Number).required(),
                FormField::new("valid_until", "Valid until", Date),
                FormField::new("status", "Status", options(&["draft", "sent", "accepted", "declined"])),
                FormField::new("note", "Note", Textarea),
            ],
        ),
        writable(
            "proposals",
            "Proposals",
            EndpointDescriptor::keyed("/proposals", "proposals", "proposal"),
            &[
                ("title", "Title"),
                ("client.name", "Client"),
                ("amount", "Amount"),
                ("date", "Date"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("title", "Title", Text).required(),
                FormField::new("amount", "Amount", Number),
                FormField::new("date", "Date", Date).required(),
                FormField::new("status", "Status", options(&["draft", "sent", "accepted", "declined"])),
                FormField::new("content", "Content", Textarea),
            ],
        ),
        writable(
            "invoices",
            "Invoices",
            EndpointDescriptor::keyed("/invoices", "invoices", "invoice"),
            &[
                ("invoice_number", "Number"),
                ("client.name", "Client"),
                ("amount", "Amount"),
                ("due_date", "Due"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("invoice_number", "Number", Text).required(),
                FormField::new("amount", "Amount", Number).required(),
                FormField::new("issue_date", "Issue date", Date).required(),
                FormField::new("due_date", "Due date", Date),
                FormField::new("status", "Status", options(&["draft", "unpaid", "paid", "overdue"])),
                FormField::new("recurring", "Recurring", Checkbox),
            ],
        ),
        writable(
            "payments",
            "Payments",
            EndpointDescriptor::keyed("/payments", "payments", "payment"),
            &[
                ("invoice_number", "Invoice"),
                ("amount", "Amount"),
                ("method", "Method"),
                ("date", "Date"),
            ],
            vec![
                FormField::new("invoice_number", "Invoice", Text).required(),
                FormField::new("amount", "Amount", Number).required(),
                FormField::new("method", "Method", options(&["cash", "bank transfer", "card", "paypal"])),
                FormField::new("date", "Date", Date).required(),
                FormField::new("note", "Note", Textarea),
            ],
        ),
        writable(
            "expenses",
            "Expenses",
            EndpointDescriptor::keyed("/expenses", "expenses", "expense"),
            &[
                ("title", "Title"),
                ("category", "Category"),
                ("amount", "Amount"),
                ("date", "Date"),
            ],
            vec![
                FormField::new("title", "Title", Text).required(),
                FormField::new("category", "Category", Text),
                FormField::new("amount", "Amount", Number).required(),
                FormField::new("date", "Date", Date).required(),
                FormField::new("receipt", "Receipt", File),
                FormField::new("billable", "Billable", Checkbox),
            ],
        ),
        writable(
            "orders",
            "Orders",
            EndpointDescriptor::keyed("/orders", "orders", "order"),
            &[
                ("order_number", "Number"),
                ("client.name", "Client"),
                ("total", "Total"),
                ("order_date", "Date"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("order_number", "Number", Text).required(),
                FormField::new("total", "Total", Number).required(),
                FormField::new("order_date", "Date", Date),
                FormField::new("status", "Status", options(&["new", "processing", "completed", "cancelled"])),
            ],
        ),
        writable(
            "tasks",
            "Tasks",
            EndpointDescriptor::keyed("/tasks", "tasks", "task"),
            &[
                ("title", "Title"),
                ("assigned_to", "Assignee"),
                ("priority", "Priority"),
                ("due_date", "Due"),
                ("status", "Status"),
            ],
            vec![
                FormField::new("title", "Title", Text).required(),
                FormField::new("assigned_to", "Assignee", Text),
                FormField::new("priority", "Priority", options(&["low", "medium", "high"])),
                FormField::new("due_date", "Due date", Date),
                FormField::new("status", "Status", options(&["todo", "in progress", "done"])),
                FormField::new("description", "Description", Textarea),
            ],
        ),
        writable(
            "tickets",
            "Tickets",
            EndpointDescriptor::keyed("/tickets", "tickets", "ticket"),
            &[
                ("subject", "Subject"),
                ("client.name", "Client"),
                ("priority", "Priority"),
                ("status", "Status"),
                ("created_at", "Opened"),
            ],
            vec![
                FormField::new("subject", "Subject", Text).required(),
                FormField::new("priority", "Priority", options(&["low", "medium", "high", "urgent"])),
                FormField::new("status", "Status", options(&["open", "pending", "closed"])),
                FormField::new("description", "Description", Textarea).required(),
                FormField::new("attachment", "Attachment", File),
            ],
        ),
        writable(
            "notes",
            "Notes",
            EndpointDescriptor::keyed("/notes", "notes", "note"),
            &[("title", "Title"), ("created_at", "Created")],
            vec![
                FormField::new("title", "Title", Text).required(),
                FormField::new("content", "Content", Textarea),
                FormField::new("is_public", "Public", Checkbox),
            ],
        ),
        writable(
            "files",
            "Files",
            EndpointDescriptor::keyed("/files", "files", "file"),
            &[
                ("name", "Name"),
                ("type", "Type"),
                ("size", "Size"),
                ("created_at", "Uploaded"),
            ],
            vec![
                FormField::new("name", "Name", Text).required(),
                FormField::new("file", "File", File).required(),
                FormField::new("description", "Description", Textarea),
            ],
        ),
        writable(
            "categories",
            "Categories",
            EndpointDescriptor::keyed("/categories", "categories", "category"),
            &[("name", "Name"), ("description", "Description")],
            vec![
                FormField::new("name", "Name", Text).required(),
                FormField::new("description", "Description", Textarea),
            ],
        ),
        writable(
            "members",
            "Team members",
            EndpointDescriptor::keyed("/members", "members", "member"),
            &[
                ("name", "Name"),
                ("email", "Email"),
                ("role", "Role"),
                ("job_title", "Job title"),
            ],
            vec![
                FormField::new("name", "Name", Text).required(),
                FormField::new("email", "Email", Email).required(),
                FormField::new("role", "Role", options(&["admin", "staff", "client"])),
                FormField::new("job_title", "Job title", Text),
            ],
        ),
        writable(
            "taxes",
            "Taxes",
            EndpointDescriptor::keyed("/taxes", "taxes", "tax"),
            &[("name", "Name"), ("percentage", "Rate (%)")],
            vec![
                FormField::new("name", "Name", Text).required(),
                FormField::new("percentage", "Rate (%)", Number).required(),
            ],
        ),
        writable(
            "timecards",
            "Time cards",
            EndpointDescriptor::keyed("/timecards", "timecards", "timecard"),
            &[
                ("member.name", "Member"),
                ("date", "Date"),
                ("start_time", "In"),
                ("end_time", "Out"),
                ("hours", "Hours"),
            ],
            vec![
                FormField::new("date", "Date", Date).required(),
                FormField::new("start_time", "In", Text).required(),
                FormField::new("end_time", "Out", Text),
                FormField::new("hours", "Hours", Number),
                FormField::new("note", "Note", Textarea),
            ],
        ),
        read_only(
            "notifications",
            "Notifications",
            EndpointDescriptor::keyed("/notifications/{user_id}", "notifications", "notification"),
            &[
                ("title", "Title"),
                ("message", "Message"),
                ("created_at", "Received"),
                ("read", "Read"),
            ],
        ),
        read_only(
            "messages",
            "Messages",
            EndpointDescriptor::keyed("/messages/user/{user_id}", "messages", "message"),
            &[
                ("sender.name", "From"),
                ("subject", "Subject"),
                ("created_at", "Sent"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let names: BTreeSet<_> = all().iter().map(|schema| schema.name).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn covers_every_backend_collection() {
        let paths: BTreeSet<_> = all().iter().map(|schema| schema.endpoint.path).collect();
        for path in [
            "/contracts",
            "/expenses",
            "/files",
            "/invoices",
            "/notes",
            "/orders",
            "/tickets",
            "/payments",
            "/contacts",
            "/estimates",
            "/proposals",
            "/tasks",
            "/categories",
            "/members",
            "/taxes",
            "/timecards",
            "/notifications/{user_id}",
            "/messages/user/{user_id}",
        ] {
            assert!(paths.contains(path), "missing {path}");
        }
    }

    #[test]
    fn writable_resources_have_forms_and_actions() {
        for schema in all().iter().filter(|schema| !schema.read_only) {
            assert!(!schema.form.is_empty(), "{} has no form", schema.name);
            assert!(
                schema.columns.last().is_some_and(Column::is_actions),
                "{} has no actions column",
                schema.name
            );
        }
    }

    #[test]
    fn read_only_resources_have_no_actions() {
        let notifications = find("notifications").unwrap();
        assert!(notifications.read_only);
        assert!(notifications.columns.iter().all(|column| !column.is_actions()));
        assert!(find("messages").unwrap().ensure_writable().is_err());
    }

    #[test]
    fn find_unknown_is_none() {
        assert!(find("payroll").is_none());
        assert_eq!(find("invoices").unwrap().title.as_str(), "Invoices");
    }
}
