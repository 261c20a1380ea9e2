//! Keyword retrieval over a small veterinary knowledge base

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub topic: &'static str,
    pub content: &'static str,
}

pub const VET_KNOWLEDGE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        topic: "Urinary Issues",
        content: "Male cats are prone to urethral obstructions. Straining to urinate, frequent trips to the litter box without output, or yowling while urinating are life-threatening emergencies requiring immediate vet intervention.",
    },
    KnowledgeEntry {
        topic: "Loss of Appetite",
        content: "If a cat doesn't eat for more than 24-48 hours, they are at high risk for Hepatic Lipidosis (fatty liver disease), which can be fatal. Inappetence in cats is always a clinically significant symptom.",
    },
    KnowledgeEntry {
        topic: "Toxic Plants",
        content: "Lilies (Lilium and Hemerocallis species) are extremely toxic to cats. Ingesting even a small amount of pollen or water from a vase can cause acute kidney failure. Immediate decontamination is required.",
    },
    KnowledgeEntry {
        topic: "Stress and Behavior",
        content: "Cats are creatures of habit. Changes in environment (moving, new pets, construction) often lead to stress-induced behaviors like over-grooming, hiding, or urinating outside the box (cystitis).",
    },
    KnowledgeEntry {
        topic: "Vomiting",
        content: "Occasional hairballs are normal, but frequent vomiting (more than once a week) or projectile vomiting can indicate inflammatory bowel disease, kidney issues, or hyperthyroidism.",
    },
    KnowledgeEntry {
        topic: "Dental Health",
        content: "Periodontal disease affects 70% of cats by age 3. Bad breath, drooling, or dropping food can indicate painful resorptive lesions or gingivitis requiring professional cleaning.",
    },
];

pub const FALLBACK_CONTEXT: &str =
    "Consult general feline veterinary standards for common health and behavioral issues.";

impl KnowledgeEntry {
    /// A topic word appears anywhere in the query, or the whole query
    /// appears in the content. Both sides compared lowercase.
    pub fn matches(&self, lowercase_query: &str) -> bool {
        let topic = self.topic.to_lowercase();
        topic
            .split(' ')
            .any(|word| lowercase_query.contains(word))
            || self.content.to_lowercase().contains(lowercase_query)
    }

    pub fn snippet(&self) -> String {
        format!("[Source: {}] {}", self.topic, self.content)
    }
}

pub fn retrieve(query: &str) -> Vec<&'static KnowledgeEntry> {
    let query = query.to_lowercase();
    VET_KNOWLEDGE.iter().filter(|e| e.matches(&query)).collect()
}

/// Snippets for the prompt, one per line; never empty
pub fn retrieve_context(query: &str) -> String {
    let hits = retrieve(query);
    if hits.is_empty() {
        return FALLBACK_CONTEXT.to_string();
    }
    hits.iter()
        .map(|e| e.snippet())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_word_selects_entry() {
        let context = retrieve_context("My cat keeps VOMITING after meals");
        assert!(context.starts_with("[Source: Vomiting] "));
        assert_eq!(context.lines().count(), 1);
    }

    #[test]
    fn test_content_phrase_selects_entry() {
        let hits = retrieve("hepatic lipidosis");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].topic, "Loss of Appetite");
    }

    #[test]
    fn test_multiple_hits_join_with_newline() {
        let context = retrieve_context("urinary trouble and dental pain");
        let topics: Vec<&str> = context
            .lines()
            .map(|l| l.trim_start_matches("[Source: ").split(']').next().unwrap())
            .collect();
        // "and" is a word of "Stress and Behavior"
        assert_eq!(topics, vec!["Urinary Issues", "Stress and Behavior", "Dental Health"]);
    }

    #[test]
    fn test_no_overlap_uses_fallback() {
        assert_eq!(retrieve_context("xyz"), FALLBACK_CONTEXT);
        assert!(!retrieve_context("qqq").is_empty());
    }
}
