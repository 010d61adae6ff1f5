//! Shared constants used across the application

/// Key naming the persisted conversation blob.
pub const CACHE_KEY: &str = "fl_chatbot_cache";

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes";
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_SEARCH_RESULTS: u32 = 6;

/// Result cap used when resolving a name to a recipe id.
pub const FIND_RESULTS: u32 = 1;

pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

pub const UNKNOWN_COMMAND_MESSAGE: &str =
    "Unknown command: This command is currently not supported.";

pub const NO_CONNECTION_MESSAGE: &str = "No Internet Connection";

pub const WELCOME_MESSAGE: &str = r#"Welcome to the Recipe Bot! Here are some commands you can use to find delicious recipes:

1. **Search for Recipes**
   - Type: "search recipes on [ingredient/cuisine/dish name]"
   - Example: "search recipes on chicken"

2. **List Recipes**
   - Type: "list [ingredient/cuisine/dish name] recipes"
   - Example: "list vegetarian recipes"

3. **Summary on Specific Recipe**
   - Type: "[dish name] recipe"
   - Example: "lasagna recipe"

4. **List Ingredients of a Recipe**
   - Type: "ingredients for [dish name]"
   - Example: "ingredients for apple pie"

5. **Instructions on How to Make a Recipe**
   - Type: "how to make [dish name]"
   - Example: "how to make brownies"

Feel free to ask me for any recipes or cooking instructions!"#;

pub const HELP_MESSAGE: &str = r#"Here are the commands you can use to interact with the Recipe Bot:

1. **Search for Recipes**
   - Command: "search recipes on [ingredient/cuisine/dish name]"
   - Example: "search recipes on chicken"

2. **List Recipes**
   - Command: "list [ingredient/cuisine/dish name] recipes"
   - Example: "list vegetarian recipes"

3. **Summary on Specific Recipe**
   - Command: "[dish name] recipe"
   - Example: "lasagna recipe"

4. **List Ingredients of a Recipe**
   - Command: "ingredients for [dish name]"
   - Example: "ingredients for apple pie"

5. **Instructions on How to Make a Recipe**
   - Command: "how to make [dish name]"
   - Example: "how to make brownies"

Feel free to ask for any recipes or cooking instructions. If you need further assistance, just type "help" again."#;

pub fn ambiguous_subject_message(subject: &str) -> String {
    format!(
        "I'm not sure which recipe you mean by \"{subject}\". Try rephrasing it, or type \"help\" to see the supported commands."
    )
}
