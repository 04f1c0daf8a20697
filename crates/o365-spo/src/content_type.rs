//! Content type operations.

use o365_core::{ContentTypeId, Error, Guid, Result, SiteUrl};

use crate::client::SpoClient;
use crate::csom::{ActionList, ObjectPathGraph, Parameter};
use crate::session::Session;

/// Fixed prefix of a content type's server identity.
pub const IDENTITY_PREFIX: &str =
    "6b3ec69e-00a7-0000-55a3-61f8d779d2b3|740c6a0b-85e2-48a0-a494-e0f1759d4aa7";

const CONTENT_TYPE_PATH_ID: u32 = 24;
const FIELD_LINKS_PATH_ID: u32 = 76;
const FIELD_LINK_PATH_ID: u32 = 78;

/// Validated input for removing a field link from a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFieldLinkOptions {
    /// Web containing the content type.
    pub web_url: SiteUrl,
    /// Content type to modify.
    pub content_type_id: ContentTypeId,
    /// Field link to remove.
    pub field_link_id: Guid,
    /// Propagate the change to child content types.
    pub update_child_content_types: bool,
}

impl RemoveFieldLinkOptions {
    /// Validates raw option values.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or malformed option.
    pub fn parse(
        web_url: Option<&str>,
        content_type_id: Option<&str>,
        field_link_id: Option<&str>,
        update_child_content_types: bool,
    ) -> Result<Self> {
        let web_url =
            web_url.ok_or_else(|| Error::validation("Required option webUrl not specified"))?;
        let content_type_id = content_type_id
            .ok_or_else(|| Error::validation("Required option contentTypeId not specified"))?;
        let field_link_id = field_link_id
            .ok_or_else(|| Error::validation("Required option fieldLinkId not specified"))?;

        Ok(Self {
            web_url: SiteUrl::parse(web_url)?,
            content_type_id: ContentTypeId::parse(content_type_id)?,
            field_link_id: Guid::parse(field_link_id)?,
            update_child_content_types,
        })
    }
}

/// Server identity of a content type in a given web.
#[must_use]
pub fn content_type_identity(
    site_id: Guid,
    web_id: Guid,
    content_type_id: &ContentTypeId,
) -> String {
    format!("{IDENTITY_PREFIX}:site:{site_id}:web:{web_id}:contenttype:{content_type_id}")
}

/// Builds the graph and actions that delete a field link and update the content type.
#[must_use]
pub fn field_link_removal(
    site_id: Guid,
    web_id: Guid,
    options: &RemoveFieldLinkOptions,
) -> (ObjectPathGraph, ActionList) {
    let graph = ObjectPathGraph::new()
        .property(FIELD_LINKS_PATH_ID, CONTENT_TYPE_PATH_ID, "FieldLinks")
        .method(
            FIELD_LINK_PATH_ID,
            FIELD_LINKS_PATH_ID,
            "GetById",
            vec![Parameter::Guid(options.field_link_id)],
        )
        .identity(
            CONTENT_TYPE_PATH_ID,
            content_type_identity(site_id, web_id, &options.content_type_id),
        );

    let actions = ActionList::new()
        .object_path(77, FIELD_LINKS_PATH_ID)
        .object_path(79, FIELD_LINK_PATH_ID)
        .method(80, FIELD_LINK_PATH_ID, "DeleteObject", vec![])
        .method(
            81,
            CONTENT_TYPE_PATH_ID,
            "Update",
            vec![Parameter::Boolean(options.update_child_content_types)],
        );

    (graph, actions)
}

/// Removes a field link from a content type.
///
/// Obtains a request digest, resolves the site and web ids, then runs a
/// single ProcessQuery request.
///
/// # Errors
///
/// Returns an auth error if the digest cannot be obtained, a transport
/// error for HTTP failures, or a remote error reported by SharePoint.
pub async fn remove_field_link(
    client: &SpoClient,
    session: &Session,
    options: &RemoveFieldLinkOptions,
) -> Result<()> {
    let web_url = &options.web_url;
    let digest = client.request_digest(session, web_url).await?;
    let site_id = client.site_id(session, web_url).await?;
    let web_id = client.web_id(session, web_url).await?;
    tracing::debug!(
        %site_id,
        %web_id,
        content_type = %options.content_type_id,
        "resolved content type location"
    );

    let (graph, actions) = field_link_removal(site_id, web_id, options);
    client
        .execute_object_path_request(session, web_url, &digest, &graph, &actions)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csom::RequestEnvelope;

    const WEB_URL: &str = "https://contoso.sharepoint.com";
    const FIELD_LINK_ID: &str = "5ee2dd25-d941-455a-9bdb-7f2c54aed11b";
    const CONTENT_TYPE_ID: &str = "0x0100558D85B7216F6A489A499DB361E1AE2F";

    fn parse(field_link_id: &str, update_children: bool) -> Result<RemoveFieldLinkOptions> {
        RemoveFieldLinkOptions::parse(
            Some(WEB_URL),
            Some(CONTENT_TYPE_ID),
            Some(field_link_id),
            update_children,
        )
    }

    #[test]
    fn test_parse_valid_options() {
        let options = parse(FIELD_LINK_ID, true).unwrap();
        assert_eq!(options.web_url.as_str(), WEB_URL);
        assert!(options.update_child_content_types);
    }

    #[test]
    fn test_parse_rejects_missing_options() {
        let ct = Some(CONTENT_TYPE_ID);
        let field = Some(FIELD_LINK_ID);
        assert!(RemoveFieldLinkOptions::parse(Some(WEB_URL), None, field, false).is_err());
        assert!(RemoveFieldLinkOptions::parse(Some(WEB_URL), ct, None, false).is_err());
        assert!(RemoveFieldLinkOptions::parse(None, ct, field, false).is_err());
        let err = RemoveFieldLinkOptions::parse(Some("http://contoso"), ct, field, false).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_guid() {
        let err = parse("xxx", false).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "xxx is not a valid GUID");
    }

    #[test]
    fn test_identity_embeds_site_web_and_content_type() {
        let site = Guid::parse("50720268-eff5-48e0-835e-de588b007927").unwrap();
        let web = Guid::parse("d1b7a30d-7c22-4c54-a686-f1c298ced3c7").unwrap();
        let ct = ContentTypeId::parse(CONTENT_TYPE_ID).unwrap();
        assert_eq!(
            content_type_identity(site, web, &ct),
            "6b3ec69e-00a7-0000-55a3-61f8d779d2b3|740c6a0b-85e2-48a0-a494-e0f1759d4aa7:site:50720268-eff5-48e0-835e-de588b007927:web:d1b7a30d-7c22-4c54-a686-f1c298ced3c7:contenttype:0x0100558D85B7216F6A489A499DB361E1AE2F"
        );
    }

    #[test]
    fn test_removal_request_is_well_formed() {
        let options = parse(FIELD_LINK_ID, false).unwrap();
        let site = Guid::parse("50720268-eff5-48e0-835e-de588b007927").unwrap();
        let web = Guid::parse("d1b7a30d-7c22-4c54-a686-f1c298ced3c7").unwrap();
        let (graph, actions) = field_link_removal(site, web, &options);
        let envelope = RequestEnvelope::build(&graph, &actions).unwrap();
        assert_eq!(envelope.action_count(), 4);
        assert!(envelope.as_str().contains(concat!(
            r#"<Method Name="Update" Id="81" ObjectPathId="24">"#,
            r#"<Parameters><Parameter Type="Boolean">false</Parameter></Parameters></Method>"#
        )));
    }
}
