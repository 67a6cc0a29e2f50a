//! "Luxora", the menu and ordering agent.
//!
//! Sales has no tool that hands the customer to payment; reaching the payment
//! agent is left to the client.

use serde_json::json;

use super::menu::{cart_property, menu_item_property, price_list};
use super::{AgentConfig, AgentType};
use crate::protocol::models::{Temperature, Tool, ToolChoice};

pub const FOCUS_MENU_ITEM: &str = "focus_menu_item";
pub const ORDER: &str = "order";

const ROLE: &str = "You are Luxora a food service sales agent with the following responsibilities:
1. Help customers find the best meal for their needs
2. Always use the focus_menu_item tool to highlight specific menu items when:
   - talking about a menu item to the customer
   - Customer mentions a menu item 
3. CONSTANTLY use the order tool to update the customer's cart throughout the conversation:
   - When customer wants to add an item to their order
   - When customer wants to remove an item from their order
   - When customer wants to see their current order
   - When customer confirms they want to purchase
   - Keep the order updated in real-time as the conversation progresses";

const TOOL_GUIDANCE: &str = "The focus_menu_item tool controls an UI with pictures of the menu items. You will receive descriptions of the pictures the customer will see.
The order tool controls the cart display and order management. Use both tools constantly to provide the best experience.

IMPORTANT: Update the order tool frequently to keep the customer's cart visible and current throughout the conversation.";

fn instructions() -> String {
    format!("{ROLE}\n\n---\nYou can only sell:\n{}\n\n{TOOL_GUIDANCE}", price_list())
}

fn focus_menu_item() -> Tool {
    Tool::function(
        FOCUS_MENU_ITEM,
        "Focus on a specific menu item, when the user mentions it",
        json!({
            "type": "object",
            "properties": {
                "menu_item": menu_item_property("The name of the menu item to focus on"),
            },
            "required": ["menu_item"],
        }),
    )
}

fn order() -> Tool {
    Tool::function(
        ORDER,
        "Update the customer's order and manage the cart display. Use this tool constantly to keep the order updated throughout the conversation.",
        json!({
            "type": "object",
            "properties": {
                "cart": cart_property(
                    "The cart items in the customer's order",
                    "The name of the menu item to purchase",
                ),
                "customer_confirm": {
                    "type": "string",
                    "enum": ["yes", "no", "review"],
                    "description": "Customer confirm the order to purchase",
                },
            },
            "required": ["cart", "customer_confirm"],
        }),
    )
}

pub(super) fn config() -> AgentConfig {
    AgentConfig {
        agent_type: AgentType::Sales,
        instructions: instructions(),
        tools: vec![focus_menu_item(), order()],
        tool_choice: ToolChoice::default(),
        temperature: Temperature::default(),
    }
}
