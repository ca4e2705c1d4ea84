//! Prompt templates
//!
//! The two prompt shapes sent to the model: grounded in a document excerpt,
//! or plain when nothing is attached.

/// Prompt asking the model to answer only from `excerpt`
pub fn grounded_prompt(excerpt: &str, question: &str) -> String {
    format!(
        "You are a helpful AI assistant that answers questions about the provided PDF content.\n\
         \n\
         PDF Content:\n\
         {excerpt}\n\
         \n\
         Question: {question}\n\
         \n\
         Please provide a detailed and accurate response based on the PDF content. \
         If the answer cannot be found in the PDF, please state that clearly."
    )
}

/// Prompt used when no document is attached
pub fn plain_prompt(question: &str) -> String {
    format!(
        "You are a helpful AI assistant.\n\
         \n\
         Question: {question}\n\
         \n\
         Please provide a helpful response. Note: No PDF has been uploaded yet."
    )
}
