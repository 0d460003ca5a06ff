//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use flockloop_domain::{MediaType, SubmissionDecision};
use uuid::Uuid;

/// Command-line client for the Flockloop marketplace.
#[derive(Parser, Debug)]
#[command(name = "flockloop", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// End the session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Create a content creator account.
    Register {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Confirm an email address.
    ConfirmEmail {
        /// Token from the confirmation email.
        token: String,
    },
    /// Send the confirmation email again.
    ResendConfirmation {
        /// Account email.
        email: String,
    },
    /// Organisations and invitations.
    #[command(subcommand)]
    Org(OrgCommand),
    /// Campaigns.
    #[command(subcommand)]
    Campaigns(CampaignCommand),
    /// Tracks.
    #[command(subcommand)]
    Tracks(TrackCommand),
    /// Submissions.
    #[command(subcommand)]
    Submissions(SubmissionCommand),
    /// Media objects.
    #[command(subcommand)]
    Media(MediaCommand),
}

/// Organisation commands.
#[derive(Subcommand, Debug)]
pub enum OrgCommand {
    /// Register an organisation and its first manager.
    Register {
        /// Organisation name.
        #[arg(long)]
        org_name: String,
        /// Manager email.
        #[arg(long)]
        email: String,
        /// Manager name.
        #[arg(long)]
        name: String,
        /// Manager password.
        #[arg(long)]
        password: String,
    },
    /// Invite a manager.
    Invite {
        /// Invitee email.
        email: String,
    },
    /// List invitations.
    Invitations,
    /// Revoke a pending invitation.
    Revoke {
        /// Invitation id.
        id: Uuid,
    },
    /// Accept an invitation.
    Accept {
        /// Token from the invitation email.
        #[arg(long)]
        token: String,
        /// Display name.
        #[arg(long)]
        name: String,
        /// Password for the new account.
        #[arg(long)]
        password: String,
    },
}

/// Campaign commands.
#[derive(Subcommand, Debug)]
pub enum CampaignCommand {
    /// List campaigns.
    List,
    /// Show one campaign.
    Show {
        /// Campaign id.
        id: Uuid,
    },
    /// Create a campaign.
    Create {
        /// Campaign name.
        #[arg(long)]
        name: String,
        /// Track to promote.
        #[arg(long)]
        track_id: Uuid,
    },
}

/// Track commands.
#[derive(Subcommand, Debug)]
pub enum TrackCommand {
    /// List tracks.
    List,
    /// Show one track.
    Show {
        /// Track id.
        id: Uuid,
    },
    /// Register an uploaded song as a track.
    Create {
        /// Track title.
        #[arg(long)]
        title: String,
        /// Performing artist.
        #[arg(long)]
        artist: String,
        /// Uploaded song.
        #[arg(long)]
        media_id: Uuid,
        /// Uploaded cover image.
        #[arg(long)]
        thumbnail_id: Option<Uuid>,
    },
}

/// Submission commands.
#[derive(Subcommand, Debug)]
pub enum SubmissionCommand {
    /// List submissions.
    List {
        /// Only submissions to this campaign.
        #[arg(long)]
        campaign: Option<Uuid>,
    },
    /// Submit a video to a campaign.
    Create {
        /// Target campaign.
        #[arg(long)]
        campaign: Uuid,
        /// Uploaded video.
        #[arg(long)]
        media: Uuid,
        /// Uploaded thumbnail.
        #[arg(long)]
        thumbnail: Option<Uuid>,
    },
    /// Accept or reject a submission.
    Review(ReviewArgs),
}

/// Arguments of `submissions review`.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Submission id.
    pub id: Uuid,
    /// Decision.
    #[arg(long, value_enum)]
    pub decision: Decision,
    /// Feedback for the creator.
    #[arg(long)]
    pub feedback: Option<String>,
}

/// Media commands.
#[derive(Subcommand, Debug)]
pub enum MediaCommand {
    /// Upload a file.
    Upload {
        /// File to upload.
        file: PathBuf,
        /// What the file is.
        #[arg(long = "type", value_enum)]
        kind: MediaKind,
        /// MIME type; guessed from the extension when omitted.
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print a download URL.
    DownloadUrl {
        /// Media id.
        id: Uuid,
    },
}

/// Media kinds accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Audio track.
    Song,
    /// Promotional video.
    Video,
    /// Cover or preview image.
    Thumbnail,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Song => Self::Song,
            MediaKind::Video => Self::Video,
            MediaKind::Thumbnail => Self::Thumbnail,
        }
    }
}

/// Review decisions accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Accept the submission.
    Accept,
    /// Reject the submission.
    Reject,
}

impl From<Decision> for SubmissionDecision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => Self::Accepted,
            Decision::Reject => Self::Rejected,
        }
    }
}
