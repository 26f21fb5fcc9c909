//! Canned Aura+ replies used when no AI key is configured.

use std::time::Duration;

use async_trait::async_trait;

use super::{ChatError, ChatMode, ChatSession};

const GREETING_REPLY: &str = "Namaste! I am Aura+ (currently in Offline Mode). I can still help you with information about:\n\n1. Luxury Weddings\n2. Corporate Events\n3. Budget Estimates\n4. Contacting our Team";

const WEDDING_REPLY: &str = "StarVnt is India's authority on Cinematic Weddings. We offer end-to-end planning including:\n- Venue Sourcing (Palaces & Hotels)\n- Decor & Production\n- Bridal Styling by FTAura\n- Moniqui Gifting\n\nOur wedding packages start from ₹5 Lakhs.";

const CORPORATE_REPLY: &str = "For Corporate MICE, Tech Summits, and Social Parties, we provide precision logistics and immersive experiences. We handle everything from stage production to guest hospitality.";

const PRICING_REPLY: &str = "Our pricing is tailored to your vision:\n- Intimate Events: ₹5L - ₹15L\n- Grand Celebrations: ₹25L - ₹80L\n- Luxury Productions: ₹1Cr+\n\nYou can use the 'Budget Calculator' on our homepage for a detailed breakdown.";

const CONTACT_REPLY: &str = "To book a consultation, please use the 'Book Now' button on the site.\n\nDirect Contact:\nWhatsApp: +91 70441 98505\nEmail: events@starvnt.com";

const EMI_REPLY: &str = "Yes! StarVnt is the only planner offering 'Wedding on EMI'. We partner with top NBFCs to offer 0% interest payment plans so you can host your dream event now and pay later.";

const DEFAULT_REPLY: &str = "I am currently operating in Offline Demo Mode because I cannot connect to the main AI network. \n\nHowever, StarVnt is fully operational! Please ask me about 'Weddings', 'Corporate Events', or 'Pricing', or contact our human team directly via the WhatsApp button.";

/// Keyword rules, first match wins. Matching is a plain substring test on
/// the lowercased input, so "hi" also fires inside longer words.
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi", "namaste"], GREETING_REPLY),
    (&["wedding", "marriage"], WEDDING_REPLY),
    (&["corporate", "event", "party"], CORPORATE_REPLY),
    (&["price", "cost", "budget", "money"], PRICING_REPLY),
    (&["contact", "phone", "email", "book"], CONTACT_REPLY),
    (&["emi", "loan"], EMI_REPLY),
];

/// Picks the canned reply for `input`.
#[must_use]
pub fn offline_reply(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_REPLY, |&(_, reply)| reply)
}

/// Keyword-matching session with an artificial thinking delay.
#[derive(Debug, Clone)]
pub struct OfflineSession {
    delay: Duration,
}

impl OfflineSession {
    /// Creates a session that waits `delay` before every reply.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ChatSession for OfflineSession {
    fn mode(&self) -> ChatMode {
        ChatMode::Offline
    }

    async fn send(&self, input: &str) -> Result<String, ChatError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(offline_reply(input).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_checked_in_order() {
        assert_eq!(offline_reply("Namaste"), GREETING_REPLY);
        assert_eq!(offline_reply("Planning a MARRIAGE"), WEDDING_REPLY);
        assert_eq!(offline_reply("office party"), CORPORATE_REPLY);
        assert_eq!(offline_reply("what does it cost?"), PRICING_REPLY);
        assert_eq!(offline_reply("Can I book?"), CONTACT_REPLY);
        assert_eq!(offline_reply("EMI plans"), EMI_REPLY);
        assert_eq!(offline_reply("zzz"), DEFAULT_REPLY);
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        // "wedding budget" hits both the wedding and pricing rules.
        assert_eq!(offline_reply("wedding budget"), WEDDING_REPLY);
        // "hi" is a substring of "this".
        assert_eq!(offline_reply("this loan"), GREETING_REPLY);
    }

    #[tokio::test]
    async fn session_replies_without_network() {
        let session = OfflineSession::new(Duration::ZERO);
        assert_eq!(session.mode(), ChatMode::Offline);
        assert_eq!(session.send("loan").await, Ok(EMI_REPLY.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let session = OfflineSession::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        let _ = session.send("hello").await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
