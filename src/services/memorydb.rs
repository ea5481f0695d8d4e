service_statement! {
    /// Statement builder for Amazon MemoryDB (`memorydb`).
    MemoryDb, "memorydb";
    actions {
        to_batch_update_cluster => "BatchUpdateCluster", Write;
        to_connect => "Connect", Write;
        to_copy_snapshot => "CopySnapshot", Write;
        to_create_acl => "CreateAcl", Write;
        to_create_cluster => "CreateCluster", Write;
        to_create_parameter_group => "CreateParameterGroup", Write;
        to_create_snapshot => "CreateSnapshot", Write;
        to_create_subnet_group => "CreateSubnetGroup", Write;
        to_create_user => "CreateUser", Write;
        to_delete_acl => "DeleteAcl", Write;
        to_delete_cluster => "DeleteCluster", Write;
        to_delete_parameter_group => "DeleteParameterGroup", Write;
        to_delete_snapshot => "DeleteSnapshot", Write;
        to_delete_subnet_group => "DeleteSubnetGroup", Write;
        to_delete_user => "DeleteUser", Write;
        to_describe_acls => "DescribeAcls", Read;
        to_describe_clusters => "DescribeClusters", Read;
        to_describe_engine_versions => "DescribeEngineVersions", Read;
        to_describe_events => "DescribeEvents", Read;
        to_describe_parameter_groups => "DescribeParameterGroups", Read;
        to_describe_parameters => "DescribeParameters", Read;
        to_describe_service_updates => "DescribeServiceUpdates", Read;
        to_describe_snapshots => "DescribeSnapshots", Read;
        to_describe_subnet_groups => "DescribeSubnetGroups", Read;
        to_describe_users => "DescribeUsers", Read;
        to_failover_shard => "FailoverShard", Write;
        to_list_allowed_node_type_updates => "ListAllowedNodeTypeUpdates", List;
        to_list_tags => "ListTags", Read;
        to_reset_parameter_group => "ResetParameterGroup", Write;
        to_tag_resource => "TagResource", Tagging;
        to_untag_resource => "UntagResource", Tagging;
        to_update_acl => "UpdateAcl", Write;
        to_update_cluster => "UpdateCluster", Write;
        to_update_parameter_group => "UpdateParameterGroup", Write;
        to_update_subnet_group => "UpdateSubnetGroup", Write;
        to_update_user => "UpdateUser", Write;
    }
    resources {
        on_acl(acl_name => "AclName") => "arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}";
        on_cluster(cluster_name => "ClusterName") =>
            "arn:${Partition}:memorydb:${Region}:${Account}:cluster/${ClusterName}";
        on_parameter_group(parameter_group_name => "ParameterGroupName") =>
            "arn:${Partition}:memorydb:${Region}:${Account}:parametergroup/${ParameterGroupName}";
        on_snapshot(snapshot_name => "SnapshotName") =>
            "arn:${Partition}:memorydb:${Region}:${Account}:snapshot/${SnapshotName}";
        on_subnet_group(subnet_group_name => "SubnetGroupName") =>
            "arn:${Partition}:memorydb:${Region}:${Account}:subnetgroup/${SubnetGroupName}";
        on_user(user_name => "UserName") => "arn:${Partition}:memorydb:${Region}:${Account}:user/${UserName}";
    }
    conditions {
        if_tls_enabled => "memorydb:TLSEnabled", "Bool";
    }
}
