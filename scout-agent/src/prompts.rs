use std::collections::HashMap;

use scout_core::{FieldSpec, Value};
use scout_prompt::PromptTemplate;

use crate::state::ResearchState;

pub const MAIN_PROMPT: &str = "You are doing research on companies. You are trying to figure out this information:

<info>
{{info}}
</info>

Here is some examples of what this information looks like for other companies. Pay attention to the format of the values.

<examples>
{{examples}}
</examples>

You have access to the following tools:

- `Search`: call a search tool and get back some results
- `ScrapeWebsite`: scrape a website and get relevant notes about the company. This will update the notes above.
- `Info`: call this when you are done and have gathered all the relevant info

Here is the information you have about the company you are researching:

{{known_info}}";

pub const CHECKER_PROMPT: &str = "I am thinking of calling the info tool with the info below. Is this good? It is good if (a) it is accurate, (b) the value is the same format as the values in the list below:

<examples>
{{examples}}
</examples>

If you don't think it is good, you should be very specific about what could be improved.

Make sure to pass in both `reason` and the `good` boolean.

Here is the information you are going to call the info tool with:

{{presumed_info}}";

pub const BAD_CALL_MESSAGE: &str = "You must call one, and only one, tool!";

pub fn main_prompt(state: &ResearchState, field: &FieldSpec) -> String {
    let vars = HashMap::from([
        ("info".to_string(), field.json_schema()),
        ("examples".to_string(), Value::Array(state.examples.clone())),
        (
            "known_info".to_string(),
            Value::Object(state.input_info.clone()),
        ),
    ]);
    PromptTemplate::new(MAIN_PROMPT).render(&vars)
}

pub fn checker_prompt(examples: &[Value], presumed_info: &Value) -> String {
    let vars = HashMap::from([
        ("examples".to_string(), Value::Array(examples.to_vec())),
        ("presumed_info".to_string(), presumed_info.clone()),
    ]);
    PromptTemplate::new(CHECKER_PROMPT).render(&vars)
}
