//! "Karol", the payment and delivery agent.

use serde_json::json;

use super::menu::cart_property;
use super::{AgentConfig, AgentType};
use crate::protocol::models::{Temperature, Tool, ToolChoice};

pub const UPDATE_ORDER_DATA: &str = "update_order_data";
/// Zero-argument escape hatch back to the sales agent.
pub const TRANSFER_TO_MENU_AGENT: &str = "transfer_to_menu_agent";

const INSTRUCTIONS: &str = r#"You are Karol, a payments and delivery agent, with the following responsibilities:
1. Ask the customer to review and confirm the items in their cart (menu item names & quantities).
2. Remind the customer that delivery is always free and continuously update the order data.
3. Continuously update the order data while collect and validate:
   • Payment information (credit card number, expiration date, CVV)
   • Full name
   • Delivery address
   • Contact phone number
   • Email
4. If the customer says they're not sure which meal to buy at any point or want to see other menu items, transfer immediately call the transfer_to_menu_agent tool to hand off to a menu-specialist.
5. Once all required fields (cart, name, address, contact_phone, num) are provided by the customer and has confirmed by setting "confirm":"yes", call update_order_data one final time with all fields and "confirm":"yes", then thank the customer and conclude the session.

IMPORTANT: You can only work with the existing cart items. DO NOT add new menu items to the cart. If the customer wants to add items, transfer them back to the sales agent using transfer_to_menu_agent.

---
Use clear, polite language, validate inputs, allow the customer to correct mistakes, and rely only on these tools:
- update_order_data
- transfer_to_menu_agent

---
Constantly update the order data as much as possible.
Continuously update the order data as soon as the customer provides the information.
Use the update_order_data tool as much as possible"#;

fn string_property(description: &str) -> serde_json::Value {
    json!({ "type": "string", "description": description })
}

fn update_order_data() -> Tool {
    Tool::function(
        UPDATE_ORDER_DATA,
        "Update one or more fields of the customer's order (cart, contact info, payment info, order number) and always include confirmation.",
        json!({
            "type": "object",
            "properties": {
                "cart": cart_property(
                    "List of menu items and quantities in the customer's cart",
                    "Name of the menu item",
                ),
                "name": string_property("Customer's full name"),
                "address": string_property("Shipping address"),
                "contact_phone": string_property("Phone for shipping notifications"),
                "credit_card_number": string_property("Customer's credit card number"),
                "expiration_date": string_property("Credit card expiration date (MM/YY)"),
                "cvv": string_property("Credit card CVV code (3 or 4 digits)"),
                "confirm": {
                    "type": "string",
                    "enum": ["yes", "no"],
                    "description": "Customer confirms everything is correct and wants to proceed with payment",
                },
            },
            "required": ["confirm"],
        }),
    )
}

fn transfer_to_menu_agent() -> Tool {
    Tool::function(
        TRANSFER_TO_MENU_AGENT,
        "Transfer the conversation to a menu-specialist agent so they can help the customer choose which menu item to buy",
        json!({
            "type": "object",
            "properties": {},
            "required": [],
        }),
    )
}

pub(super) fn config() -> AgentConfig {
    AgentConfig {
        agent_type: AgentType::Payment,
        instructions: INSTRUCTIONS.to_string(),
        tools: vec![update_order_data(), transfer_to_menu_agent()],
        tool_choice: ToolChoice::default(),
        temperature: Temperature::default(),
    }
}
