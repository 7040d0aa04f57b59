//! Invitation messages.
//!
//! After a draw every participant gets a WhatsApp message built from an
//! editable template. The message carries two links back into the app: one
//! that reveals their secret friend and one that logs them into the group feed.

use url::Url;

use crate::error::SantaResult;
use crate::model::{Group, Id, Participant};

pub const NAME_TOKEN: &str = "{{NOME}}";
pub const GROUP_TOKEN: &str = "{{GRUPO}}";
pub const REVEAL_LINK_TOKEN: &str = "{{LINK_REVELACAO}}";
pub const GROUP_LINK_TOKEN: &str = "{{LINK_GRUPO}}";
/// Single-link placeholder from older templates; it stands for the group link.
pub const LEGACY_LINK_TOKEN: &str = "{{LINK}}";

pub const DEFAULT_TEMPLATE: &str = "Olá *{{NOME}}*!\n\nO Sorteio do Amigo Invisível do grupo *{{GRUPO}}* foi realizado!\n\n🤫 *VEJA QUEM VOCÊ TIROU:* \n{{LINK_REVELACAO}}\n\n🎁 *PARTICIPE DO GRUPO:* \n{{LINK_GRUPO}}";

const WHATSAPP_BASE: &str = "https://wa.me/";

/// What an entry link asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Reveal,
    Group,
}

impl LinkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkAction::Reveal => "reveal",
            LinkAction::Group => "group",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reveal" => Some(LinkAction::Reveal),
            "group" => Some(LinkAction::Group),
            _ => None,
        }
    }
}

/// `base?gid=<group>&uid=<participant>&action=<action>`. Any query or
/// fragment already on `base` is dropped.
pub fn entry_link(
    base: &Url,
    group_id: Id<Group>,
    participant_id: Id<Participant>,
    action: LinkAction,
) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair("gid", &group_id.to_db_string())
        .append_pair("uid", &participant_id.to_db_string())
        .append_pair("action", action.as_str());
    url
}

pub fn reveal_link(base: &Url, group_id: Id<Group>, participant_id: Id<Participant>) -> Url {
    entry_link(base, group_id, participant_id, LinkAction::Reveal)
}

pub fn group_link(base: &Url, group_id: Id<Group>, participant_id: Id<Participant>) -> Url {
    entry_link(base, group_id, participant_id, LinkAction::Group)
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct MessageVars<'a> {
    pub participant_name: &'a str,
    pub group_name: &'a str,
    pub reveal_link: &'a str,
    pub group_link: &'a str,
}

/// Fills every placeholder. A template using the legacy `{{LINK}}` gets the
/// group link there and the reveal link appended; a template that lost both
/// link placeholders gets both links appended, so a message never goes out
/// without a way in.
pub fn render_message(template: &str, vars: &MessageVars<'_>) -> String {
    let mut message = template
        .replace(NAME_TOKEN, vars.participant_name)
        .replace(GROUP_TOKEN, vars.group_name)
        .replace(REVEAL_LINK_TOKEN, vars.reveal_link)
        .replace(GROUP_LINK_TOKEN, vars.group_link);

    if message.contains(LEGACY_LINK_TOKEN) {
        message = message.replace(LEGACY_LINK_TOKEN, vars.group_link);
        message.push_str(&format!("\n\nQuem você tirou: {}", vars.reveal_link));
    } else if !message.contains(vars.reveal_link) && !message.contains(vars.group_link) {
        message.push_str(&format!(
            "\n\nQuem você tirou: {}\nGrupo: {}",
            vars.reveal_link, vars.group_link
        ));
    }

    message
}

/// `https://wa.me/<digits>?text=<message>`.
pub fn whatsapp_link(phone: &str, message: &str) -> SantaResult<Url> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut url = Url::parse(WHATSAPP_BASE)?.join(&digits)?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

/// A ready-to-send invitation for one participant.
#[derive(Debug, Clone)]
pub struct Invitation {
    pub participant_id: Id<Participant>,
    pub participant_name: String,
    pub message: String,
    pub reveal_link: Url,
    pub group_link: Url,
    pub whatsapp_link: Url,
}

/// `None` until the participant has been assigned a secret friend.
pub fn invitation_for(
    base: &Url,
    group: &Group,
    participant: &Participant,
    template: &str,
) -> SantaResult<Option<Invitation>> {
    if participant.secret_friend_name.is_none() {
        return Ok(None);
    }

    let reveal = reveal_link(base, group.id, participant.id);
    let group_url = group_link(base, group.id, participant.id);
    let message = render_message(
        template,
        &MessageVars {
            participant_name: &participant.name,
            group_name: &group.name,
            reveal_link: reveal.as_str(),
            group_link: group_url.as_str(),
        },
    );
    let whatsapp = whatsapp_link(&participant.phone, &message)?;

    Ok(Some(Invitation {
        participant_id: participant.id,
        participant_name: participant.name.clone(),
        message,
        reveal_link: reveal,
        group_link: group_url,
        whatsapp_link: whatsapp,
    }))
}

/// Invitations for every assigned participant, in roster order.
pub fn invitations(
    base: &Url,
    group: &Group,
    participants: &[Participant],
    template: &str,
) -> SantaResult<Vec<Invitation>> {
    let mut out = Vec::with_capacity(participants.len());
    for participant in participants {
        if let Some(invitation) = invitation_for(base, group, participant, template)? {
            out.push(invitation);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> MessageVars<'static> {
        MessageVars {
            participant_name: "Ana",
            group_name: "Natal da Família",
            reveal_link: "https://santa.example/?action=reveal",
            group_link: "https://santa.example/?action=group",
        }
    }

    #[test]
    fn default_template_fills_all_placeholders() {
        let msg = render_message(DEFAULT_TEMPLATE, &vars());
        assert!(msg.starts_with("Olá *Ana*!"));
        assert!(msg.contains("*Natal da Família*"));
        assert!(msg.contains("https://santa.example/?action=reveal"));
        assert!(msg.contains("https://santa.example/?action=group"));
        assert!(!msg.contains("{{"));
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        let msg = render_message("{{NOME}} {{NOME}} {{LINK_REVELACAO}}", &vars());
        assert_eq!(msg, "Ana Ana https://santa.example/?action=reveal");
    }

    #[test]
    fn legacy_link_becomes_group_link_plus_reveal_line() {
        let msg = render_message("Oi {{NOME}}: {{LINK}}", &vars());
        assert_eq!(
            msg,
            "Oi Ana: https://santa.example/?action=group\n\nQuem você tirou: https://santa.example/?action=reveal"
        );
    }

    #[test]
    fn template_without_links_gets_both_appended() {
        let msg = render_message("Feliz Natal, {{NOME}}!", &vars());
        assert!(msg.ends_with(
            "\n\nQuem você tirou: https://santa.example/?action=reveal\nGrupo: https://santa.example/?action=group"
        ));
    }

    #[test]
    fn entry_link_replaces_existing_query() {
        let base = Url::parse("https://santa.example/app?gid=old#top").unwrap();
        let gid = Id::<Group>::generate();
        let uid = Id::<Participant>::generate();
        let link = reveal_link(&base, gid, uid);

        assert_eq!(link.path(), "/app");
        assert!(link.fragment().is_none());
        let pairs: Vec<(String, String)> = link.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("gid".to_string(), gid.to_db_string()),
                ("uid".to_string(), uid.to_db_string()),
                ("action".to_string(), "reveal".to_string()),
            ]
        );
    }

    #[test]
    fn whatsapp_link_uses_digits_only() {
        let link = whatsapp_link("+55 (34) 99999-0000", "Olá!").unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/5534999990000");
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some("Olá!"));
    }

    #[test]
    fn link_action_parse() {
        assert_eq!(LinkAction::parse("reveal"), Some(LinkAction::Reveal));
        assert_eq!(LinkAction::parse("group"), Some(LinkAction::Group));
        assert_eq!(LinkAction::parse("other"), None);
    }
}
