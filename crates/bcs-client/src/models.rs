//! Record types carried by the bulk endpoint
//!
//! Every field is optional: the API omits values it does not have, and
//! absence has to stay distinguishable from a zero or `false`. Date and
//! date-time fields use the vendor codecs from [`bcs_common::dates`].

use bcs_common::dates::{Date, DateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decode::bulk_record;

/// The closed set of record kinds understood by the scanner.
///
/// Wire values are matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Device,
    TrackSummary,
    TrackSmupieRecommendation,
    #[serde(rename = "sw_eox_bulletin")]
    SwEoxBulletin,
    #[serde(rename = "hw_eox_bulletin")]
    HwEoxBulletin,
    #[serde(rename = "fn_bulletin")]
    FieldNoticeBulletin,
    PsirtBulletin,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Device,
        RecordKind::TrackSummary,
        RecordKind::TrackSmupieRecommendation,
        RecordKind::SwEoxBulletin,
        RecordKind::HwEoxBulletin,
        RecordKind::FieldNoticeBulletin,
        RecordKind::PsirtBulletin,
    ];

    /// Discriminator value as it appears in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Device => "device",
            RecordKind::TrackSummary => "track_summary",
            RecordKind::TrackSmupieRecommendation => "track_smupie_recommendation",
            RecordKind::SwEoxBulletin => "sw_eox_bulletin",
            RecordKind::HwEoxBulletin => "hw_eox_bulletin",
            RecordKind::FieldNoticeBulletin => "fn_bulletin",
            RecordKind::PsirtBulletin => "psirt_bulletin",
        }
    }
}

/// The discriminator names a kind outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bulk_record! {
    /// A network device known to the collector.
    Device => RecordKind::Device, {
        /// Collector identifier (4 character collector id or appliance id)
        collector: String = "collector",
        config_register: String = "configRegister",
        /// Completed, NotAvailable or NotSupported
        config_status: String = "configStatus",
        /// Last successful configuration collection
        config_time: DateTime = "configTime",
        create_date: DateTime = "createDate",
        device_id: i64 = "deviceId",
        /// Management IP address
        device_ip: String = "deviceIp",
        device_name: String = "deviceName",
        /// Usually ACTIVE or DEVICE NOT REACHABLE
        device_status: String = "deviceStatus",
        device_sys_name: String = "deviceSysName",
        device_type: String = "deviceType",
        feature_setdesc: String = "featureSetdesc",
        image_name: String = "imageName",
        /// Whether the device came from a seed file rather than being derived
        in_seed_file: bool = "inSeedFile",
        inventory_status: String = "inventoryStatus",
        inventory_time: DateTime = "inventoryTime",
        ip_address: String = "ipAddress",
        /// Last reset as reported by `show version`
        last_reset: DateTime = "lastReset",
        product_family: String = "productFamily",
        product_id: String = "productId",
        product_type: String = "productType",
        reset_reason: String = "resetReason",
        /// IOS, IOS XR, IOS-XE, NX-OS, ...
        sw_type: String = "swType",
        sw_version: String = "swVersion",
        sys_contact: String = "sysContact",
        sys_description: String = "sysDescription",
        sys_location: String = "sysLocation",
        sys_object_id: String = "sysObjectId",
        user_field1: String = "userField1",
        user_field2: String = "userField2",
        user_field3: String = "userField3",
        user_field4: String = "userField4",
    }
}

bulk_record! {
    /// Compliance summary for one software track.
    TrackSummary => RecordKind::TrackSummary, {
        sw_type: String = "swType",
        track_candidate_sw_version: String = "trackCandidateSwVersion",
        track_comments: String = "trackComments",
        track_compliant_devices: i64 = "trackCompliantDevices",
        track_description: String = "trackDescription",
        /// Join key across the track endpoints
        track_id: i64 = "trackId",
        track_last_modified_date: Date = "trackLastModifiedDate",
        track_name: String = "trackName",
        track_non_compliant_devices: i64 = "trackNonCompliantDevices",
        track_percent_compliant: f64 = "trackPercentCompliant",
        track_percent_flexible_compliant: f64 = "trackPercentFlexibleCompliant",
        track_prev1_pie_criteria: String = "trackPrev1PieCriteria",
        track_prev1_smu_criteria: String = "trackPrev1SmuCriteria",
        track_prev2_pie_criteria: String = "trackPrev2PieCriteria",
        track_prev2_smu_criteria: String = "trackPrev2SmuCriteria",
        track_prev_compliant_devices: i64 = "trackPrevCompliantDevices",
        track_prev_sw_version1: String = "trackPrevSwVersion1",
        track_prev_sw_version2: String = "trackPrevSwVersion2",
        /// Good, Fair or Poor
        track_rating: String = "trackRating",
        track_recommendation_date: Date = "trackRecommendationDate",
        track_smu_compliance_percent: f64 = "trackSmuCompliancePercent",
        track_standard_pie_criteria: String = "trackStandardPieCriteria",
        track_standard_smu_count: i64 = "trackStandardSmuCount",
        track_standard_smu_criteria: String = "trackStandardSmuCriteria",
        track_standard_sw_version: String = "trackStandardSwVersion",
        track_status: String = "trackStatus",
        track_total_devices: i64 = "trackTotalDevices",
        track_total_sw_versions: i64 = "trackTotalSwVersions",
        track_upgrade_reason: String = "trackUpgradeReason",
    }
}

bulk_record! {
    /// A SMU or PIE recommended for a software track.
    TrackSmupieRecommendation => RecordKind::TrackSmupieRecommendation, {
        sw_name: String = "swName",
        /// SYSTEM, PKG or SMU
        sw_role: String = "swRole",
        track_id: i64 = "trackId",
        track_name: String = "trackName",
        /// Current, Previous1, Previous2 or Candidate
        track_rec_history: String = "trackRecHistory",
    }
}

bulk_record! {
    /// Software end-of-life bulletin.
    SwEoxBulletin => RecordKind::SwEoxBulletin, {
        bulletin_number: String = "bulletinNumber",
        bulletin_title: String = "bulletinTitle",
        bulletin_url: String = "bulletinUrl",
        eo_life_announcement_date: DateTime = "eoLifeAnnouncementDate",
        eo_sale_date: DateTime = "eoSaleDate",
        eo_security_vul_support_date: DateTime = "eoSecurityVulSupportDate",
        eo_sw_maintenance_releases_date: DateTime = "eoSwMaintenanceReleasesDate",
        /// Last Date of Support
        last_date_of_support: DateTime = "lastDateOfSupport",
        sw_eox_id: i64 = "swEoxId",
        sw_maintenance_version: String = "swMaintenanceVersion",
        sw_major_version: String = "swMajorVersion",
        sw_train: String = "swTrain",
        sw_type: String = "swType",
    }
}

bulk_record! {
    /// Hardware end-of-life bulletin.
    HwEoxBulletin => RecordKind::HwEoxBulletin, {
        bulletin_number: String = "bulletinNumber",
        bulletin_title: String = "bulletinTitle",
        bulletin_url: String = "bulletinUrl",
        eo_life_announcement_date: DateTime = "eoLifeAnnouncementDate",
        eo_new_service_attach_date: DateTime = "eoNewServiceAttachDate",
        eo_routine_failure_analysis_date: DateTime = "eoRoutineFailureAnalysisDate",
        eo_sale_date: DateTime = "eoSaleDate",
        eo_security_vul_support_date: DateTime = "eoSecurityVulSupportDate",
        eo_software_contract_renewal_date: DateTime = "eoSoftwareContractRenewalDate",
        eo_sw_maintenance_releases_date: DateTime = "eoSwMaintenanceReleasesDate",
        hw_eox_id: i64 = "hwEoxId",
        last_date_of_support: DateTime = "lastDateOfSupport",
        last_ship_date: DateTime = "lastShipDate",
        product_id: String = "productId",
    }
}

bulk_record! {
    /// Field notice bulletin.
    FieldNoticeBulletin => RecordKind::FieldNoticeBulletin, {
        /// Kept as text: the API allows a regex here on input
        bulletin_first_published: String = "bulletinFirstPublished",
        bulletin_last_updated: DateTime = "bulletinLastUpdated",
        bulletin_mapping_caveat: String = "bulletinMappingCaveat",
        bulletin_title: String = "bulletinTitle",
        bulletin_url: String = "bulletinUrl",
        field_notice_id: String = "fieldNoticeId",
        /// hardware, software or other
        fn_type: String = "fnType",
        problem_description: String = "problemDescription",
    }
}

bulk_record! {
    /// Security advisory (PSIRT) bulletin.
    PsirtBulletin => RecordKind::PsirtBulletin, {
        bulletin_first_published: String = "bulletinFirstPublished",
        bulletin_last_updated: DateTime = "bulletinLastUpdated",
        bulletin_mapping_caveat: String = "bulletinMappingCaveat",
        bulletin_summary: String = "bulletinSummary",
        bulletin_title: String = "bulletinTitle",
        bulletin_url: String = "bulletinUrl",
        bulletin_version: String = "bulletinVersion",
        /// Comma separated bug ids
        cisco_bug_ids: String = "ciscoBugIds",
        cve_id: String = "cveId",
        cvss_base: String = "cvssBase",
        cvss_temporal: String = "cvssTemporal",
        psirt_advisory_id: String = "psirtAdvisoryId",
        psirt_cold_id: i64 = "psirtColdId",
        /// Security Impact Rating
        sir: String = "sir",
    }
}
