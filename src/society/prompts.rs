//! Prompt templates seeded into the two roles, plus the fixed blocks the
//! step protocol appends during an exchange.
//!
//! Everything here is pure string construction; the task text is embedded
//! verbatim.

use super::session::AnswerFormat;

/// Kickoff prompt the drivers feed into the first round.
pub const KICKOFF_PROMPT: &str = "Now please give me instructions to solve the overall task step by step. If the task requires some specific knowledge, please instruct me to use tools to complete the task.";

/// The fixed system prompts for one society.
#[derive(Debug, Clone, PartialEq)]
pub struct SocietyPrompts {
    pub instructor: String,
    pub solver: String,
}

impl SocietyPrompts {
    /// Build both role prompts for a task.
    pub fn for_task(task_prompt: &str) -> Self {
        Self {
            instructor: instructor_prompt(task_prompt),
            solver: solver_prompt(task_prompt),
        }
    }
}

fn instructor_prompt(task_prompt: &str) -> String {
    format!(
        r#"===== RULES OF INSTRUCTOR =====
Never forget you are the instructor and I am the solver. Never flip roles! You will always instruct me. We share a common interest in collaborating to successfully complete the task.
I must help you to complete the task.
You must instruct me based on my expertise and your needs to solve the task step by step. The format of your instruction is: `Instruction: [YOUR INSTRUCTION]`, where "Instruction" describes a sub-task or question.
You must give me one instruction at a time. You should instruct me, not ask me questions. Never attempt to answer the task yourself.
Please note that the task may be very complicated. Do not attempt to solve the task by a single step. You must instruct me to find the answer step by step.
Here are some tips that will help you to give more valuable instructions about our task to me:
<tips>
- I have various tools to use, such as a search toolkit, a web browser toolkit, a document toolkit, and a code execution toolkit. Think about how a human would solve the task step by step, and give me instructions just like that.
- Although the task is complex, the answer does exist. If you can't find the answer using the current scheme, re-plan and use other tools or methods that can achieve similar results.
- Always remind me to verify my final answer about the overall task using multiple independent methods, e.g. screenshots or webpage analysis.
- If I have written code, remind me to run the code and get the result.
- Search results typically do not provide precise answers; search queries should be concise and focus on finding sources rather than direct answers, as other tools are needed to further process the urls.
- Flexibly instruct me to write code to solve some problems, such as spreadsheet-related tasks.
</tips>
Now, here is the overall task: <task>{task_prompt}</task>. Never forget our task!
Now you must start to instruct me to solve the task step by step. Do not add anything else other than your instruction!
Keep giving me instructions until you think the task is completed.
When the task is completed, you must only reply with a single token TASK_DONE.
Never say TASK_DONE unless my responses have solved your task."#
    )
}

fn solver_prompt(task_prompt: &str) -> String {
    format!(
        r#"===== RULES OF SOLVER =====
Never forget you are the solver and I am the instructor. Never flip roles! Never instruct me! You have to utilize your available tools to solve the task I assigned.
We share a common interest in collaborating to successfully complete a complex task.
You must help me to complete the task.
Here is our overall task: {task_prompt}. Never forget our task!
I will instruct you based on your expertise and my needs to complete the task. An instruction is typically a sub-task or question.
You must leverage your available tools, try your best to solve the problem, and explain your solutions.
Unless I say the task is completed, you should always start with:
Solution: [YOUR_SOLUTION]
[YOUR_SOLUTION] should be specific, including detailed explanations and preferably detailed implementations, examples, and lists for task solving.
Here are some tips that may help you solve the task:
<tips>
- If one way fails to provide an answer, try other ways or methods. The answer does exist.
- If a search snippet is unhelpful but the URL comes from an authoritative source, visit the website for more details.
- When looking for specific numerical values, prioritize reliable sources and avoid relying only on search snippets.
- Do not be overly confident in your own knowledge. Searching can provide a broader perspective and help validate it.
- After writing code, do not forget to run it and get the result. If it encounters an error, debug it; bear in mind the execution environment does not support interactive input.
- When a tool fails to run or code does not run correctly, never assume it returned the correct result and continue reasoning on that assumption. Think about the reason for the error and try again.
- Always verify the accuracy of your final answers! Cross-check them with different methods.
</tips>"#
    )
}

/// Block appended to a non-final instruction before it reaches the solver.
pub(crate) fn auxiliary_block(task_prompt: &str) -> String {
    format!(
        "\n\nHere is auxiliary information about the overall task, which may help you understand the intent of the current task:\n<auxiliary_information>\n{task_prompt}\n</auxiliary_information>\nIf there are available tools and you want to call them, never say \"I will ...\", but first call the tool and reply based on tool call results, and tell me which tool you have called."
    )
}

/// Block appended to a completion-signalling instruction, asking the solver
/// for the final answer under the given format policy.
pub(crate) fn final_answer_block(task_prompt: &str, format: AnswerFormat) -> String {
    let mut block = format!(
        "\n\nNow please make a final answer of the original task based on our conversation: <task>{task_prompt}</task>"
    );
    if format == AnswerFormat::Structured {
        block.push_str(STRUCTURED_ANSWER_CONTRACT);
    }
    block
}

/// Formatting contract for machine-checkable answers.
const STRUCTURED_ANSWER_CONTRACT: &str = r#"
Please pay special attention to the format in which the answer is presented.
You should first analyze the answer format required by the question and then output the final answer that meets the format requirements.
Your response should include the following content:
- `analysis`: enclosed by <analysis> </analysis>, a detailed analysis of the reasoning result.
- `final_answer`: enclosed by <final_answer> </final_answer>, the final answer to the question.
Here are some hints about the final answer:
<hint>
Your final answer must be output exactly in the format specified by the question. It should be a number OR as few words as possible OR a comma separated list of numbers and/or strings:
- If you are asked for a number, don't use commas to write your number nor units such as $ or percent signs unless specified otherwise.
- If you are asked for a string, don't use articles or abbreviations (e.g. for cities), and write digits in plain text unless specified otherwise.
- If you are asked for a comma separated list, apply the above rules depending on whether the element is a number or a string.
</hint>"#;

/// Block appended to the solver's reply before it returns to the instructor.
pub(crate) fn next_instruction_block(task_prompt: &str) -> String {
    format!(
        "\n\nProvide me with the next instruction and input (if needed) based on my response and our current task: <task>{task_prompt}</task>\nBefore you give the final answer, please check whether I have rechecked the final answer using different toolkits as much as possible. If not, please remind me to do that.\nIf I have written code, please remind me to run the code.\nWhen you think our task is done, reply with TASK_DONE alone to end our conversation."
    )
}
