//! Human-readable booking summary shown before the customer confirms.

use super::draft::{BookingDraft, TestDriveLocation};

pub const CONFIRM: &str = "Confirm";
pub const REJECT: &str = "Reject";

const TO_BE_CONFIRMED: &str = "To be confirmed";

/// Fixed dealer details printed on every confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowroomDetails {
    pub address: String,
    pub helpline: String,
}

/// Renders the confirmation text. Pure: unchanged inputs give
/// byte-identical output, which the re-render path relies on.
pub fn render_confirmation(
    selected_car: Option<&str>,
    draft: &BookingDraft,
    showroom: &ShowroomDetails,
) -> String {
    format!(
        "Perfect! Here's your test drive confirmation:\n\
         \n\
         📋 TEST DRIVE CONFIRMED:\n\
         👤 Name: {name}\n\
         📱 Phone: {phone}\n\
         🚗 Car: {car}\n\
         📅 Date: {date}\n\
         ⏰ Time: {time}\n\
         {location}\n\
         \n\
         What to bring:\n\
         ✅ Valid driving license\n\
         ✅ Photo ID\n\
         📞 Need help? Call us: {helpline}\n\
         \n\
         Quick reminder: We'll also have financing options ready if you like the car during your test drive!\n\
         \n\
         Please confirm your booking:",
        name = draft.name.as_deref().unwrap_or("Not provided"),
        phone = draft.phone.as_deref().unwrap_or("Not provided"),
        car = selected_car.unwrap_or("Not selected"),
        date = date_display(draft),
        time = draft.time_slot.as_deref().unwrap_or("Not selected"),
        location = location_text(draft.location.as_ref(), showroom),
        helpline = showroom.helpline,
    )
}

/// Formatted date, else the literal Today/Tomorrow, else the named day.
fn date_display(draft: &BookingDraft) -> &str {
    if let Some(formatted) = draft.formatted_date.as_deref() {
        return formatted;
    }
    match draft.date_choice.as_deref() {
        Some(choice @ ("Today" | "Tomorrow")) => choice,
        _ => draft.day.as_deref().unwrap_or(TO_BE_CONFIRMED),
    }
}

fn location_text(location: Option<&TestDriveLocation>, showroom: &ShowroomDetails) -> String {
    match location {
        Some(TestDriveLocation::HomePickup { address }) => format!(
            "\n📍 Test Drive Location: {}",
            address.as_deref().unwrap_or(TO_BE_CONFIRMED)
        ),
        Some(TestDriveLocation::ShowroomPickup) => format!(
            "\n📍 Showroom Address: {}\n🅿️ Free parking available",
            showroom.address
        ),
        Some(TestDriveLocation::Delivery { drop_location }) => format!(
            "\n📍 Test Drive Location: {}",
            drop_location.as_deref().unwrap_or(TO_BE_CONFIRMED)
        ),
        Some(TestDriveLocation::Other { .. }) | None => {
            format!("\n📍 Test Drive Location: {}", TO_BE_CONFIRMED)
        }
    }
}
